use super::{
    list_devices, parse_status, strip_decoration, Device, DeviceList, Section, SelectionError,
};
use crate::wpctl::AudioControl;
use anyhow::{anyhow, Result};

const WPCTL_STATUS: &str = "\
PipeWire 'pipewire-0' [1.0.5, user@host, cookie:1234]
 └─ Clients:
        33. WirePlumber                         [1.0.5, user@host, pid:1204]

Audio
 ├─ Devices:
 │      42. Built-in Audio                      [alsa]
 │
 ├─ Sinks:
 │  *   46. Built-in Audio Analog Stereo        [vol: 0.40]
 │      51. HDMI / DisplayPort 3 Output         [vol: 1.00 MUTED]
 │
 ├─ Sink endpoints:
 │
 ├─ Sources:
 │      47. Built-in Audio Analog Stereo        [vol: 1.00]
 │  *   58. USB Microphone Mono                 [vol: 0.72]
 │
 ├─ Source endpoints:
 │
 └─ Streams:

Video
 ├─ Devices:
 │      39. Integrated Camera                   [v4l2]
 │
 ├─ Sinks:
 │
 ├─ Sources:
 │  *   52. Integrated Camera (V4L2)
 │
 └─ Streams:
";

struct StaticStatus(Result<String, String>);

impl AudioControl for StaticStatus {
    fn status(&self) -> Result<String> {
        self.0.clone().map_err(|err| anyhow!(err))
    }

    fn set_default(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    fn setter_command(&self, id: &str) -> Vec<String> {
        vec!["wpctl".to_string(), "set-default".to_string(), id.to_string()]
    }
}

fn device(id: &str, name: &str, is_default: bool) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        is_default,
    }
}

#[test]
fn parses_minimal_sinks_section() {
    let text = "Sinks:\n  * 1. Speakers [vol: 0.80]\n  2. Headphones [vol: 0.50]\n\nSources:\n  3. Mic [vol: 1.00]\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(
        list.devices(),
        &[device("1", "Speakers", true), device("2", "Headphones", false)]
    );
    assert_eq!(list.default_id(), Some("1"));
    assert_eq!(list.labels(), vec!["-> Speakers", "Headphones"]);
}

#[test]
fn parses_real_wpctl_sinks() {
    let list = parse_status(WPCTL_STATUS, Section::Sinks);
    assert_eq!(
        list.devices(),
        &[
            device("46", "Built-in Audio Analog Stereo", true),
            device("51", "HDMI / DisplayPort 3 Output", false),
        ]
    );
    assert_eq!(list.default_id(), Some("46"));
}

#[test]
fn parses_first_sources_section_only() {
    let list = parse_status(WPCTL_STATUS, Section::Sources);
    assert_eq!(list.len(), 2);
    assert_eq!(list.default_id(), Some("58"));
    assert!(list.devices().iter().all(|d| d.name != "Integrated Camera (V4L2)"));
}

#[test]
fn strips_volume_annotation() {
    let list = parse_status("Sinks:\n3. Speakers [vol: 0.50]\n", Section::Sinks);
    assert_eq!(list.devices()[0].name, "Speakers");
    assert!(!list.devices()[0].name.contains("[vol:"));
}

#[test]
fn keeps_line_without_volume() {
    let list = parse_status("Sources:\n *  52. Integrated Camera\n\n", Section::Sources);
    assert_eq!(list.devices(), &[device("52", "Integrated Camera", true)]);
}

#[test]
fn missing_section_yields_empty_list() {
    let list = parse_status("Audio\n ├─ Devices:\n │  42. Card\n", Section::Sinks);
    assert!(list.is_empty());
    assert_eq!(list.default_id(), None);
}

#[test]
fn section_with_no_items_is_empty() {
    let list = parse_status("Sinks:\n\n  1. Late [vol: 1.00]\n", Section::Sinks);
    assert!(list.is_empty());
}

#[test]
fn blank_line_of_glyphs_ends_section() {
    let text = "Sinks:\n │  1. First [vol: 1.00]\n │\n │  2. After [vol: 1.00]\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(list.devices(), &[device("1", "First", false)]);
}

#[test]
fn skips_lines_without_delimiter() {
    let text = "Sinks:\n  garbage line\n  4. Real [vol: 0.10]\n  5.NoSpace\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(list.devices(), &[device("4", "Real", false)]);
}

#[test]
fn splits_on_first_delimiter_only() {
    let list = parse_status("Sinks:\n  7. Dr. Speaker [vol: 1.00]\n", Section::Sinks);
    assert_eq!(list.devices(), &[device("7", "Dr. Speaker", false)]);
}

#[test]
fn strip_decoration_removes_tree_glyphs_and_ansi() {
    let cleaned = strip_decoration(" ├─ \x1b[1mSinks:\x1b[0m\n │  └─ x");
    assert_eq!(cleaned, "  Sinks:\n    x");
}

#[test]
fn default_label_resolves_to_default_id() {
    let list = parse_status(WPCTL_STATUS, Section::Sinks);
    let labels = list.labels();
    assert_eq!(labels[0], "-> Built-in Audio Analog Stereo");
    let resolved = list.resolve(&labels[0]).expect("default resolves");
    assert_eq!(Some(resolved.id.as_str()), list.default_id());
    assert!(list.is_current_default(resolved));
}

#[test]
fn resolve_plain_name() {
    let list = parse_status(WPCTL_STATUS, Section::Sinks);
    let resolved = list.resolve("HDMI / DisplayPort 3 Output").expect("resolves");
    assert_eq!(resolved.id, "51");
    assert!(!list.is_current_default(resolved));
}

#[test]
fn resolve_unknown_selection_is_typed_error() {
    let list = parse_status(WPCTL_STATUS, Section::Sinks);
    let err = list.resolve("Bluetooth Headset").unwrap_err();
    assert_eq!(err, SelectionError::NotFound("Bluetooth Headset".to_string()));
    assert!(err.to_string().contains("Bluetooth Headset"));
}

#[test]
fn duplicate_names_are_disambiguated_by_id() {
    let text = "Sinks:\n  * 10. USB Audio [vol: 1.00]\n  11. USB Audio [vol: 0.20]\n  12. Speakers\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(
        list.labels(),
        vec!["-> USB Audio (10)", "USB Audio (11)", "Speakers"]
    );
    assert_eq!(list.resolve("USB Audio (11)").expect("resolves").id, "11");
    assert_eq!(list.resolve("-> USB Audio (10)").expect("resolves").id, "10");
    assert!(list.resolve("USB Audio").is_err());
}

fn assert_labels_round_trip(list: &DeviceList) {
    let labels = list.labels();
    for (index, label) in labels.iter().enumerate() {
        assert_eq!(
            labels.iter().filter(|other| *other == label).count(),
            1,
            "label {label:?} repeats in {labels:?}"
        );
        let resolved = list.resolve(label).expect("every label resolves");
        assert_eq!(resolved.id, list.devices()[index].id, "label {label:?}");
    }
}

#[test]
fn id_suffix_never_shadows_a_real_name() {
    let text = "Sinks:\n  1. X (2)\n  2. X\n  3. X\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(list.labels(), vec!["X (2) (1)", "X (2) #2", "X (3)"]);
    assert_labels_round_trip(&list);
    assert!(list.resolve("X (2)").is_err());
}

#[test]
fn device_named_like_the_marker_stays_distinct() {
    let text = "Sinks:\n  1. -> Foo\n  * 2. Foo\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(list.labels(), vec!["-> Foo (1)", "-> Foo (2)"]);
    assert_labels_round_trip(&list);
    assert_eq!(list.resolve("Foo (2)").expect("unmarked default").id, "2");
    assert!(list.resolve("-> Foo").is_err());
}

#[test]
fn marker_on_a_non_default_entry_is_not_accepted() {
    let list = parse_status(WPCTL_STATUS, Section::Sinks);
    assert!(list.resolve("-> HDMI / DisplayPort 3 Output").is_err());
    assert_labels_round_trip(&list);
}

#[test]
fn repeated_ids_fall_back_to_list_position() {
    let text = "Sinks:\n  5. Dock\n  5. Dock\n  6. Dock (5) #1\n";
    let list = parse_status(text, Section::Sinks);
    assert_eq!(
        list.labels(),
        vec!["Dock (5) #1", "Dock (5) #2", "Dock (5) #1 (6)"]
    );
    assert_labels_round_trip(&list);
}

#[test]
fn list_devices_uses_status_command_output() {
    let control = StaticStatus(Ok(WPCTL_STATUS.to_string()));
    let list = list_devices(&control, Section::Sinks).expect("list");
    assert_eq!(list.len(), 2);
}

#[test]
fn list_devices_propagates_status_failure() {
    let control = StaticStatus(Err("wpctl status exited with code 1".to_string()));
    assert!(list_devices(&control, Section::Sources).is_err());
}

#[test]
fn section_wording() {
    assert_eq!(Section::Sinks.header(), "Sinks:");
    assert_eq!(Section::Sources.noun(), "source");
    assert_eq!(Section::Sources.plural(), "sources");
    assert_eq!(Section::Sinks.prompt(), "Select Sink:");
}
