// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::{
    testing::{VirtualMidiAccess, Wire},
    Error, Level, Opcode,
};

fn new_panel(ids: &[&str]) -> (ConfigPanel<VirtualMidiAccess, Vec<Notification>>, Wire) {
    new_panel_with_access(VirtualMidiAccess::new(ids))
}

fn new_panel_with_access(
    access: VirtualMidiAccess,
) -> (ConfigPanel<VirtualMidiAccess, Vec<Notification>>, Wire) {
    let wire = access.wire();
    let panel = ConfigPanel::new(Config::default(), access, Vec::new());
    (panel, wire)
}

fn wire_hex(wire: &Wire) -> Vec<String> {
    wire.borrow()
        .iter()
        .map(|(_, bytes)| crate::HexBytes(bytes).to_string())
        .collect()
}

fn levels(panel: &ConfigPanel<VirtualMidiAccess, Vec<Notification>>) -> Vec<(Operation, Level)> {
    panel
        .notifications()
        .iter()
        .map(|notification| (notification.operation, notification.level))
        .collect()
}

#[test]
fn refresh_selects_first_endpoint() {
    let (mut panel, _) = new_panel(&["a", "b"]);
    assert!(panel.active_endpoint().is_none());
    panel.refresh_devices().unwrap();
    assert_eq!(2, panel.endpoints().len());
    assert_eq!("a", panel.active_endpoint().unwrap().id.as_str());
    assert_eq!(
        vec![
            (Operation::ListDevices, Level::Success),
            (Operation::Connect, Level::Success),
        ],
        levels(&panel)
    );
    assert_eq!("Connected to MSW-810 a", panel.notifications()[1].message);
}

#[test]
fn refresh_without_auto_selection() {
    let access = VirtualMidiAccess::new(&["a"]);
    let config = Config {
        auto_select_first: false,
        ..Default::default()
    };
    let mut panel = ConfigPanel::new(config, access, Vec::new());
    panel.refresh_devices().unwrap();
    assert!(panel.active_endpoint().is_none());
    assert_eq!(vec![(Operation::ListDevices, Level::Success)], levels(&panel));
}

#[test]
fn refresh_without_endpoints() {
    let (mut panel, _) = new_panel(&[]);
    panel.refresh_devices().unwrap();
    assert!(panel.active_endpoint().is_none());
    assert_eq!(vec![(Operation::ListDevices, Level::Success)], levels(&panel));
}

#[test]
fn refresh_without_capability() {
    let mut access = VirtualMidiAccess::new(&["a"]);
    access.deny();
    let (mut panel, _) = new_panel_with_access(access);
    assert!(matches!(
        panel.refresh_devices(),
        Err(Error::CapabilityUnavailable { .. })
    ));
    assert!(panel.endpoints().is_empty());
    assert!(panel.active_endpoint().is_none());
    assert_eq!(vec![(Operation::ListDevices, Level::Error)], levels(&panel));
}

#[test]
fn commands_without_device_are_rejected() {
    let (mut panel, wire) = new_panel(&["a"]);
    assert_eq!(
        Err(Error::NoDeviceSelected),
        panel.set_channel(Channel::new(5).unwrap())
    );
    assert_eq!(
        Err(Error::NoDeviceSelected),
        panel.set_note_priority(NotePriority::High)
    );
    assert_eq!(
        Err(Error::NoDeviceSelected),
        panel.set_root_octave(RootOctave::MAX)
    );
    assert_eq!(Err(Error::NoDeviceSelected), panel.reboot_to_bootloader());
    assert_eq!(Err(Error::NoDeviceSelected), panel.calibrate());
    assert_eq!(Err(Error::NoDeviceSelected), panel.quick_calibrate());
    assert!(wire.borrow().is_empty());
    assert_eq!(ParameterState::default(), *panel.parameters());
    assert_eq!(6, panel.notifications().len());
    assert!(panel.notifications().iter().all(Notification::is_error));
}

#[test]
fn ui_selections_on_the_wire() {
    let (mut panel, wire) = new_panel(&["a"]);
    panel.refresh_devices().unwrap();
    panel.set_channel("5".parse().unwrap()).unwrap();
    panel.set_note_priority("2".parse().unwrap()).unwrap();
    panel.set_root_octave("0".parse().unwrap()).unwrap();
    panel.reboot_to_bootloader().unwrap();
    panel.calibrate().unwrap();
    panel.quick_calibrate().unwrap();
    assert_eq!(
        vec![
            "F0 7D 08 10 0C 04 F7",
            "F0 7D 08 10 0E 02 F7",
            "F0 7D 08 10 0D 00 F7",
            "F0 7D 08 10 0B F7",
            "F0 7D 08 10 0F F7",
            "F0 7D 08 10 0A F7",
        ],
        wire_hex(&wire)
    );
    assert_eq!(
        ParameterState {
            channel: Channel::new(5).unwrap(),
            note_priority: NotePriority::Last,
            root_octave: RootOctave::MIN,
        },
        *panel.parameters()
    );
    let command_levels = levels(&panel).split_off(2);
    assert_eq!(
        vec![
            (Operation::Command(Opcode::SetChannel), Level::Success),
            (Operation::Command(Opcode::SetNotePriority), Level::Success),
            (Operation::Command(Opcode::SetRootOctave), Level::Success),
            (Operation::Command(Opcode::RebootToBootloader), Level::Success),
            (Operation::Command(Opcode::FullCalibration), Level::Success),
            (Operation::Command(Opcode::QuickCalibration), Level::Success),
        ],
        command_levels
    );
}

#[test]
fn select_unknown_device_discards_session() {
    let (mut panel, wire) = new_panel(&["a"]);
    panel.refresh_devices().unwrap();
    panel.set_root_octave(RootOctave::new(3).unwrap()).unwrap();
    let parameters = *panel.parameters();

    assert_eq!(
        Err(Error::DeviceNotFound { id: "x".into() }),
        panel.select_device(&"x".into())
    );
    assert!(panel.active_endpoint().is_none());
    assert_eq!(parameters, *panel.parameters());
    assert_eq!(
        Some(&Notification::error(
            Operation::Connect,
            "Failed to connect: Device not found: x"
        )),
        panel.notifications().last()
    );

    assert_eq!(Err(Error::NoDeviceSelected), panel.calibrate());
    assert_eq!(1, wire.borrow().len());
}

#[test]
fn select_another_device() {
    let (mut panel, wire) = new_panel(&["a", "b"]);
    panel.refresh_devices().unwrap();
    panel.select_device(&"b".into()).unwrap();
    assert_eq!("b", panel.active_endpoint().unwrap().id.as_str());
    panel.quick_calibrate().unwrap();
    assert_eq!("b", wire.borrow()[0].0.as_str());
}

#[test]
fn failed_send_keeps_displayed_value() {
    let access = VirtualMidiAccess::new(&["a"]);
    access.break_connections();
    let (mut panel, wire) = new_panel_with_access(access);
    panel.refresh_devices().unwrap();
    assert!(matches!(
        panel.set_channel(Channel::MAX),
        Err(Error::Send { .. })
    ));
    assert_eq!(Channel::MIN, panel.parameters().channel);
    assert!(wire.borrow().is_empty());
    assert!(panel.notifications().last().unwrap().is_error());
}

#[test]
fn disconnect() {
    let (mut panel, _) = new_panel(&["a"]);
    panel.refresh_devices().unwrap();
    let num_notifications = panel.notifications().len();
    panel.disconnect();
    assert!(panel.active_endpoint().is_none());
    assert_eq!(num_notifications + 1, panel.notifications().len());
    assert_eq!(
        Some(&Notification::success(
            Operation::Disconnect,
            "Disconnected from MSW-810 a"
        )),
        panel.notifications().last()
    );
    panel.disconnect();
    assert_eq!(
        Some(&Notification::success(
            Operation::Disconnect,
            "No device connected"
        )),
        panel.notifications().last()
    );
    assert_eq!(Err(Error::NoDeviceSelected), panel.reboot_to_bootloader());
}
