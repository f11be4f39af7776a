// SPDX-FileCopyrightText: The msw810 authors
// SPDX-License-Identifier: MPL-2.0

use std::io::{stdin, stdout, BufRead as _, Write as _};

use msw810::{Config, ConfigPanel, Level, MidirAccess, Notification, NotificationSink};

#[derive(Debug, Default)]
struct PrintNotifications;

impl NotificationSink for PrintNotifications {
    fn sink_notification(&mut self, notification: Notification) {
        let Notification { level, message, .. } = notification;
        match level {
            Level::Success => println!("{message}"),
            Level::Error => eprintln!("Error: {message}"),
        }
    }
}

const USAGE: &str = "Commands:
  list              List MIDI outputs and select the first one
  select <number>   Select a listed MIDI output
  channel <1-16>    Set the MIDI channel
  priority <0-2>    Set the note priority (0 = low, 1 = high, 2 = last)
  octave <0-5>      Set the root octave
  reboot            Reboot into the bootloader
  calibrate         Run the full calibration
  quick             Run the quick calibration
  status            Show the current settings
  quit";

fn main() {
    pretty_env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn print_endpoints(panel: &ConfigPanel<MidirAccess, PrintNotifications>) {
    let active_id = panel.active_endpoint().map(|endpoint| &endpoint.id);
    for (i, endpoint) in panel.endpoints().iter().enumerate() {
        let marker = if Some(&endpoint.id) == active_id {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {endpoint_number}: {name}",
            endpoint_number = i + 1,
            name = endpoint.name
        );
    }
}

fn run() -> anyhow::Result<()> {
    let mut panel = ConfigPanel::with_midir(Config::default(), PrintNotifications);
    // Without MIDI access there is nothing left to do.
    panel.refresh_devices()?;
    print_endpoints(&panel);
    println!("{USAGE}");

    let mut lines = stdin().lock().lines();
    loop {
        print!("> ");
        stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut args = line.split_whitespace();
        let Some(command) = args.next() else {
            continue;
        };
        let arg = args.next().unwrap_or_default();
        // Failures have already been reported as notifications.
        let _result = match command {
            "list" => {
                let result = panel.refresh_devices();
                print_endpoints(&panel);
                result
            }
            "select" => {
                let Some(endpoint) = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .and_then(|index| panel.endpoints().get(index))
                else {
                    eprintln!("Unknown device number \"{arg}\"");
                    continue;
                };
                let id = endpoint.id.clone();
                panel.select_device(&id)
            }
            "channel" => match arg.parse() {
                Ok(channel) => panel.set_channel(channel),
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            },
            "priority" => match arg.parse() {
                Ok(priority) => panel.set_note_priority(priority),
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            },
            "octave" => match arg.parse() {
                Ok(octave) => panel.set_root_octave(octave),
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            },
            "reboot" => panel.reboot_to_bootloader(),
            "calibrate" => panel.calibrate(),
            "quick" => panel.quick_calibrate(),
            "status" => {
                let parameters = panel.parameters();
                println!(
                    "Device: {device}\nChannel: {channel}\nNote priority: {priority}\nRoot octave: {octave}",
                    device = panel
                        .active_endpoint()
                        .map_or("none", |endpoint| endpoint.name.as_str()),
                    channel = parameters.channel,
                    priority = parameters.note_priority,
                    octave = parameters.root_octave,
                );
                continue;
            }
            "quit" | "exit" => break,
            _ => {
                println!("{USAGE}");
                continue;
            }
        };
    }
    Ok(())
}
