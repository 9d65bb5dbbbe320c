//! Declared types of MPD attributes.
//!
//! Only attributes typed as something other than plain text are listed;
//! anything not found here is read as text. `AdaptationSet@id` and
//! `AdaptationSet@group` are declared as integers, which is exactly where
//! real-world manifests carry values like `"main"`.

use crate::value::{ScalarType, TypeDescriptor};

const INT: TypeDescriptor = TypeDescriptor::INT;
const FLOAT: TypeDescriptor = TypeDescriptor::FLOAT;
const BOOL: TypeDescriptor = TypeDescriptor::BOOL;
const TEXT_LIST: TypeDescriptor = TypeDescriptor::List(ScalarType::Text);

/// Attributes shared by AdaptationSet, Representation and SubRepresentation.
const REPRESENTATION_BASE: &[(&str, TypeDescriptor)] = &[
    ("width", INT),
    ("height", INT),
    ("maximumSAPPeriod", FLOAT),
    ("startWithSAP", INT),
    ("maxPlayoutRate", FLOAT),
    ("codingDependency", BOOL),
];

const ADAPTATION_SET: &[(&str, TypeDescriptor)] = &[
    ("id", INT),
    ("group", INT),
    ("minBandwidth", INT),
    ("maxBandwidth", INT),
    ("minWidth", INT),
    ("maxWidth", INT),
    ("minHeight", INT),
    ("maxHeight", INT),
    ("segmentAlignment", BOOL),
    ("selectionPriority", INT),
    ("subsegmentAlignment", BOOL),
    ("subsegmentStartsWithSAP", INT),
    ("bitstreamSwitching", BOOL),
];

const REPRESENTATION: &[(&str, TypeDescriptor)] = &[
    ("bandwidth", INT),
    ("qualityRanking", INT),
    ("dependencyId", TEXT_LIST),
    ("mediaStreamStructureId", TEXT_LIST),
];

const SUB_REPRESENTATION: &[(&str, TypeDescriptor)] = &[
    ("level", INT),
    ("bandwidth", INT),
    ("dependencyLevel", TypeDescriptor::List(ScalarType::Int)),
    ("contentComponent", TEXT_LIST),
];

const CONTENT_COMPONENT: &[(&str, TypeDescriptor)] = &[("id", INT)];

const PERIOD: &[(&str, TypeDescriptor)] = &[("bitstreamSwitching", BOOL)];

const SEGMENT_BASE: &[(&str, TypeDescriptor)] = &[
    ("timescale", INT),
    ("presentationTimeOffset", INT),
    ("indexRangeExact", BOOL),
    ("availabilityTimeOffset", FLOAT),
    ("availabilityTimeComplete", BOOL),
];

/// SegmentTemplate and SegmentList extend SegmentBase with these.
const MULTIPLE_SEGMENT_BASE: &[(&str, TypeDescriptor)] = &[("duration", INT), ("startNumber", INT)];

const SEGMENT_TIMELINE_ENTRY: &[(&str, TypeDescriptor)] =
    &[("t", INT), ("n", INT), ("d", INT), ("r", INT)];

const EVENT_STREAM: &[(&str, TypeDescriptor)] = &[("timescale", INT)];

const EVENT: &[(&str, TypeDescriptor)] = &[("presentationTime", INT), ("duration", INT), ("id", INT)];

/// Attribute tables that apply to `element`, most specific first.
fn tables(element: &str) -> &'static [&'static [(&'static str, TypeDescriptor)]] {
    match element {
        "AdaptationSet" => &[ADAPTATION_SET, REPRESENTATION_BASE],
        "Representation" => &[REPRESENTATION, REPRESENTATION_BASE],
        "SubRepresentation" => &[SUB_REPRESENTATION, REPRESENTATION_BASE],
        "ContentComponent" => &[CONTENT_COMPONENT],
        "Period" => &[PERIOD],
        "SegmentBase" => &[SEGMENT_BASE],
        "SegmentTemplate" | "SegmentList" => &[MULTIPLE_SEGMENT_BASE, SEGMENT_BASE],
        "S" => &[SEGMENT_TIMELINE_ENTRY],
        "EventStream" => &[EVENT_STREAM],
        "Event" => &[EVENT],
        _ => &[],
    }
}

/// Declared type of `element@attribute`, `None` when it is plain text.
///
/// `element` is a local name; a namespace prefix (`mpd:Period`) is stripped.
pub fn declared_type(element: &str, attribute: &str) -> Option<TypeDescriptor> {
    let element = element.rsplit(':').next().unwrap_or(element);
    tables(element)
        .iter()
        .flat_map(|table| table.iter())
        .find(|(name, _)| *name == attribute)
        .map(|(_, ty)| *ty)
}

/// Declared type of `element@attribute`, defaulting to text.
pub fn type_of(element: &str, attribute: &str) -> TypeDescriptor {
    declared_type(element, attribute).unwrap_or(TypeDescriptor::TEXT)
}
