//! # Integration tests: reading a real-world manifest
//!
//! The manifest below mirrors what some streaming origins serve today:
//! AdaptationSet `id` and `group` are `"main"`, which a strict reader
//! refuses. These tests walk it the way a manifest reader would.

use std::io;
use std::sync::{Arc, Mutex};

use strata_mpd::{
    AttrParser, AttrValue, CoercionConfig, CoercionPatch, PatchState, ScalarType, StrictCoercion,
    TypeDescriptor, XmlElement, collect_elements, schema,
};

const MANIFEST: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     profiles="urn:mpeg:dash:profile:isoff-main:2011" type="static"
     minBufferTime="PT3.993S" mediaPresentationDuration="PT3M32.567S">
  <Period id="0">
    <AdaptationSet id="main" group="main" contentType="audio" segmentAlignment="true" mimeType="audio/mp4">
      <Representation id="FLAC,HI_RES_LOSSLESS" codecs="flac" bandwidth="1628064" audioSamplingRate="44100">
        <SegmentTemplate timescale="44100" initialization="https://example.invalid/0.mp4"
                         media="https://example.invalid/$Number$.mp4" startNumber="1"
                         presentationTimeOffset="18446744073709551615">
          <SegmentTimeline>
            <S d="176128" r="52"/>
            <S d="45056"/>
          </SegmentTimeline>
        </SegmentTemplate>
      </Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn adaptation_sets() -> Vec<XmlElement> {
    collect_elements(MANIFEST, "AdaptationSet").unwrap()
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `f` under a debug-level subscriber and return what it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[test]
fn strict_reader_fails_on_main_ids() {
    let parser = AttrParser::native();
    let sets = adaptation_sets();
    let err = parser.coerce_element(&sets[0]).unwrap_err();
    assert!(err.to_string().contains("main"));
}

#[test]
fn patched_reader_walks_whole_manifest() {
    let parser = AttrParser::native();
    let mut patch = CoercionPatch::new(CoercionConfig::default());
    assert_eq!(patch.activate(&parser), PatchState::Patched);

    let set = parser.coerce_element(&adaptation_sets()[0]).unwrap();
    assert_eq!(set["id"], AttrValue::Null);
    assert_eq!(set["group"], AttrValue::Null);
    assert_eq!(set["segmentAlignment"], AttrValue::Bool(true));
    assert_eq!(set["mimeType"], AttrValue::Text("audio/mp4".into()));

    let reps = collect_elements(MANIFEST, "Representation").unwrap();
    let rep = parser.coerce_element(&reps[0]).unwrap();
    assert_eq!(rep["id"], AttrValue::Text("FLAC,HI_RES_LOSSLESS".into()));
    assert_eq!(rep["bandwidth"], AttrValue::Int(1_628_064));

    let template = &collect_elements(MANIFEST, "SegmentTemplate").unwrap()[0];
    let template = parser.coerce_element(template).unwrap();
    assert_eq!(template["timescale"], AttrValue::Int(44_100));
    assert_eq!(template["startNumber"], AttrValue::Int(1));
    assert_eq!(
        template["presentationTimeOffset"].as_int(),
        Some(i128::from(u64::MAX))
    );

    let timeline: Vec<_> = collect_elements(MANIFEST, "S")
        .unwrap()
        .iter()
        .map(|s| parser.coerce_element(s).unwrap())
        .collect();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0]["r"], AttrValue::Int(52));
    assert!(!timeline[1].contains_key("r"));
}

#[test]
fn coerced_values_keep_declared_shape() {
    let parser = AttrParser::lenient();
    for set in adaptation_sets() {
        for (name, value) in parser.coerce_element(&set).unwrap() {
            assert!(value.conforms_to(schema::type_of(set.name(), &name)), "{name}");
        }
    }
}

#[test]
fn coerced_element_serializes_to_json() {
    let parser = AttrParser::lenient();
    let set = parser.coerce_element(&adaptation_sets()[0]).unwrap();
    let json = serde_json::to_value(&set).unwrap();
    assert!(json["id"].is_null());
    assert_eq!(json["contentType"], "audio");
    assert_eq!(json["segmentAlignment"], true);
}

#[test]
fn list_attributes_on_manifest_nodes() {
    let parser = AttrParser::lenient();
    let rep = XmlElement::new("Representation")
        .with_attribute("dependencyId", "v0 v1")
        .with_attribute("levels", "1,main,3");

    assert_eq!(
        parser
            .parse_attr_value(&rep, "dependencyId", TypeDescriptor::List(ScalarType::Text))
            .unwrap(),
        AttrValue::List(vec!["v0".into(), "v1".into()])
    );
    assert_eq!(
        parser
            .parse_attr_value(&rep, "levels", TypeDescriptor::List(ScalarType::Int))
            .unwrap(),
        AttrValue::List(vec!["1".into(), "main".into(), "3".into()])
    );
}

#[test]
fn coercion_failures_are_logged_at_debug() {
    let out = capture_logs(|| {
        let parser = AttrParser::lenient();
        let set = &adaptation_sets()[0];
        parser
            .parse_attr_value(set, "group", TypeDescriptor::INT)
            .unwrap();
    });

    assert!(out.contains("DEBUG"), "{out}");
    assert!(out.contains("could not convert attribute"), "{out}");
    assert!(out.contains("group"), "{out}");
    assert!(out.contains("main"), "{out}");
}

#[test]
fn silenced_failures_log_nothing() {
    let config = CoercionConfig::from_toml_str("log_failures = false").unwrap();
    let out = capture_logs(|| {
        let parser = AttrParser::from_boxed(config.build_strategy());
        let value = parser
            .parse_attr_value(&adaptation_sets()[0], "id", TypeDescriptor::INT)
            .unwrap();
        assert!(value.is_null());
    });

    assert!(out.is_empty(), "{out}");
}

#[test]
fn unsigned_long_offsets_convert_on_both_paths() {
    let template = &collect_elements(MANIFEST, "SegmentTemplate").unwrap()[0];
    for parser in [AttrParser::native(), AttrParser::lenient()] {
        let value = parser
            .parse_attr_value(template, "presentationTimeOffset", TypeDescriptor::INT)
            .unwrap();
        assert_eq!(value, AttrValue::Int(18_446_744_073_709_551_615));
    }
}

#[test]
fn scalar_accessors_on_coerced_values() {
    let parser = AttrParser::lenient();
    let rep = XmlElement::new("Representation")
        .with_attribute("maxPlayoutRate", "1.5")
        .with_attribute("codingDependency", "false");
    assert!(!rep.is_empty());
    assert!(XmlElement::new("Representation").is_empty());

    let values = parser.coerce_element(&rep).unwrap();
    assert_eq!(values["maxPlayoutRate"].as_float(), Some(1.5));
    assert_eq!(values["codingDependency"].as_bool(), Some(false));
    assert_eq!(values["maxPlayoutRate"].as_bool(), None);
}

#[test]
fn missing_target_warns_and_stays_unpatched() {
    let out = capture_logs(|| {
        let mut patch = CoercionPatch::default();
        let missing: Option<&AttrParser> = None;
        assert_eq!(patch.activate(&missing), PatchState::Unpatched);
    });
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("Could not locate attr_parser"), "{out}");
}

#[test]
fn pinned_target_warns_and_stays_unpatched() {
    let parser = AttrParser::pinned(StrictCoercion::new()).labeled("mpegdash_reader");
    assert!(parser.is_pinned());

    let out = capture_logs(|| {
        let mut patch = CoercionPatch::default();
        assert_eq!(patch.activate(&parser), PatchState::Unpatched);
    });
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("Failed to apply mpd coercion patch"), "{out}");
    assert!(out.contains("mpegdash_reader"), "{out}");
    assert_eq!(parser.strategy_name(), "strict");
}

#[test]
fn successful_activation_logs_at_debug() {
    let parser = AttrParser::native().labeled("manifest_reader");
    assert!(!parser.is_pinned());

    let out = capture_logs(|| {
        let mut patch = CoercionPatch::default();
        assert_eq!(patch.activate(&parser), PatchState::Patched);
    });
    assert!(out.contains("DEBUG"), "{out}");
    assert!(out.contains("mpd coercion patch applied"), "{out}");
    assert!(out.contains("manifest_reader"), "{out}");
    assert!(!out.contains("WARN"), "{out}");
}
