// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests over hand-assembled Matroska streams.

use std::io::Cursor;

use ebmltree::schema::ValueType;
use ebmltree::{EbmlReader, Element, Error, ReadOnlySource, Value};

const SIMPLE_BLOCK_PAYLOAD: [u8; 7] = [0x81, 0x00, 0x00, 0x80, 0xde, 0xad, 0xbe];

/// Encodes a content length as a data-size VINT.
fn size_vint(len: usize) -> Vec<u8> {
    if len < 0x7f {
        vec![0x80 | len as u8]
    }
    else {
        assert!(len < 0x3fff);
        vec![0x40 | (len >> 8) as u8, len as u8]
    }
}

/// Assembles one element from its raw ID bytes and content.
fn el(id: &[u8], content: &[u8]) -> Vec<u8> {
    let mut bytes = id.to_vec();
    bytes.extend(size_vint(content.len()));
    bytes.extend_from_slice(content);
    bytes
}

/// A standard EBML header declaring a matroska document. Its content is the
/// canonical 0x23 bytes long.
fn ebml_header() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend(el(&[0x42, 0x86], &[1])); // EBMLVersion
    body.extend(el(&[0x42, 0xf7], &[1])); // EBMLReadVersion
    body.extend(el(&[0x42, 0xf2], &[4])); // EBMLMaxIDLength
    body.extend(el(&[0x42, 0xf3], &[8])); // EBMLMaxSizeLength
    body.extend(el(&[0x42, 0x82], b"matroska")); // DocType
    body.extend(el(&[0x42, 0x87], &[2])); // DocTypeVersion
    body.extend(el(&[0x42, 0x85], &[2])); // DocTypeReadVersion
    el(&[0x1a, 0x45, 0xdf, 0xa3], &body)
}

/// A Segment holding Info, one video track, and one cluster with a single
/// SimpleBlock.
fn segment() -> Vec<u8> {
    let mut info = Vec::new();
    info.extend(el(&[0x2a, 0xd7, 0xb1], &[0x0f, 0x42, 0x40])); // TimecodeScale
    info.extend(el(&[0x44, 0x89], &5375.0f32.to_be_bytes())); // Duration
    info.extend(el(&[0x7b, 0xa9], b"test recording")); // Title
    info.extend(el(&[0x4d, 0x80], b"ebmltree")); // MuxingApp
    info.extend(el(&[0x57, 0x41], b"ebmltree")); // WritingApp
    let info = el(&[0x15, 0x49, 0xa9, 0x66], &info);

    let mut video = Vec::new();
    video.extend(el(&[0xb0], &[0x05, 0x00])); // PixelWidth
    video.extend(el(&[0xba], &[0x02, 0xd0])); // PixelHeight

    let mut track = Vec::new();
    track.extend(el(&[0xd7], &[1])); // TrackNumber
    track.extend(el(&[0x73, 0xc5], &[0x12, 0x34])); // TrackUID
    track.extend(el(&[0x83], &[1])); // TrackType
    track.extend(el(&[0x86], b"V_TEST")); // CodecID
    track.extend(el(&[0xe0], &video)); // Video
    let tracks = el(&[0x16, 0x54, 0xae, 0x6b], &el(&[0xae], &track));

    let mut cluster = Vec::new();
    cluster.extend(el(&[0xe7], &[0])); // Timecode
    cluster.extend(el(&[0xa3], &SIMPLE_BLOCK_PAYLOAD)); // SimpleBlock
    let cluster = el(&[0x1f, 0x43, 0xb6, 0x75], &cluster);

    let mut body = Vec::new();
    body.extend(info);
    body.extend(tracks);
    body.extend(cluster);
    el(&[0x18, 0x53, 0x80, 0x67], &body)
}

fn matroska_file() -> Vec<u8> {
    let mut bytes = ebml_header();
    bytes.extend(segment());
    bytes
}

#[test]
fn reads_header_of_truncated_stream() {
    let mut reader = EbmlReader::from_buffer(vec![0x1a, 0x45, 0xdf, 0xa3, 0xa3]);

    let mut head = reader.read_element(false).unwrap().unwrap();
    assert_eq!(head.id(), "1a45dfa3");
    assert_eq!(head.name(), Some("EBML"));
    assert_eq!(head.value_type(), Some(ValueType::Master));
    assert_eq!(head.depth(), 0);
    assert_eq!(head.content_len(), 0x23);
    assert_eq!(head.full_len(), 4 + 1 + 0x23);
    assert!(head.children().is_empty());

    // The declared content is absent, so fetching children hits the end of
    // the stream instead of returning the exhaustion sentinel.
    assert!(matches!(head.next_child(false), Err(Error::EndOfStream)));
}

#[test]
fn doc_type_is_reachable_after_population() {
    let mut reader = EbmlReader::from_buffer(matroska_file());

    let mut head = reader.read_element(false).unwrap().unwrap();
    assert_eq!(head.elem_pos(), Some(0));
    assert_eq!(head.data_pos(), Some(5));

    // Nothing has been materialized yet.
    assert!(head.children_by_name("DocType").is_empty());

    head.populate_children(false, false).unwrap();

    let matches = head.children_by_name("DocType");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].value_type(), Some(ValueType::Str));
    assert!(matches!(matches[0].value(), Value::Str(s) if s == "matroska"));
}

fn assert_subtree_invariants(parent: &Element) {
    if parent.is_master() {
        let consumed: u64 = parent.children().iter().map(Element::full_len).sum();
        assert_eq!(consumed, parent.content_len(), "in {:?}", parent.name());
    }

    for child in parent.children() {
        assert_eq!(child.depth(), parent.depth() + 1);
        assert_eq!(
            child.full_len(),
            (child.id_len() + child.size_len()) as u64 + child.content_len()
        );
        assert_subtree_invariants(child);
    }
}

#[test]
fn populated_subtrees_consume_exact_budgets() {
    let mut reader = EbmlReader::from_buffer(matroska_file());

    let mut head = reader.read_element(false).unwrap().unwrap();
    head.populate_children(false, false).unwrap();

    let mut segment = reader.read_element(false).unwrap().unwrap();
    assert_eq!(segment.name(), Some("Segment"));
    segment.populate_children(true, false).unwrap();

    assert_subtree_invariants(&head);
    assert_subtree_invariants(&segment);

    let scale = segment.children_by_name("Info")[0].children_by_name("TimecodeScale");
    assert!(matches!(scale[0].value(), Value::Uint(1_000_000)));

    let duration = segment.children_by_name("Info")[0].children_by_name("Duration");
    assert!(matches!(duration[0].value(), Value::Float(f) if *f == 5375.0));
}

#[test]
fn iteration_restarts_after_exhaustion() {
    let mut reader = EbmlReader::from_buffer(matroska_file());

    let mut head = reader.read_element(false).unwrap().unwrap();
    head.populate_children(false, false).unwrap();

    let mut replayed = 0;
    while head.next_child(false).unwrap().is_some() {
        replayed += 1;
    }
    assert_eq!(replayed, 7);

    // The sentinel rewound the cursor; the next pass starts over.
    let first = head.next_child(false).unwrap().unwrap();
    assert_eq!(first.name(), Some("EBMLVersion"));
}

#[test]
fn simple_block_payload_is_lazy() {
    let mut reader = EbmlReader::from_buffer(matroska_file());

    let mut head = reader.read_element(false).unwrap().unwrap();
    head.skip().unwrap();

    let mut segment = reader.read_element(false).unwrap().unwrap();
    segment.populate_children(true, false).unwrap();

    let mut seen_block = false;
    while let Some(child) = segment.next_child(false).unwrap() {
        if child.name() != Some("Cluster") {
            continue;
        }
        while let Some(grandchild) = child.next_child(false).unwrap() {
            if grandchild.name() != Some("SimpleBlock") {
                continue;
            }
            seen_block = true;

            // Read lazily, so no inline value.
            assert!(matches!(grandchild.value(), Value::None));

            let payload = grandchild.get_value(true).unwrap();
            assert_eq!(payload.as_ref(), &SIMPLE_BLOCK_PAYLOAD);

            // `keep` cached the payload; later calls serve it back.
            assert!(matches!(grandchild.value(), Value::Binary(_)));
            let again = grandchild.get_value(false).unwrap();
            assert_eq!(again.as_ref(), &SIMPLE_BLOCK_PAYLOAD);
        }
    }
    assert!(seen_block);
}

#[test]
fn unknown_elements_are_skipped() {
    let mut bytes = el(&[0x4f, 0xf0], &[1, 2, 3]);
    bytes.extend(ebml_header());

    let mut reader = EbmlReader::from_buffer(bytes);

    let unknown = reader.read_element(false).unwrap().unwrap();
    assert_eq!(unknown.id(), "4ff0");
    assert_eq!(unknown.name(), None);
    assert_eq!(unknown.value_type(), None);
    assert!(matches!(unknown.value(), Value::None));

    // The content was skipped, leaving the stream at the next boundary.
    let head = reader.read_element(false).unwrap().unwrap();
    assert_eq!(head.name(), Some("EBML"));
}

#[test]
fn overrunning_child_is_rejected() {
    // An EBML header declaring two content bytes but holding a four-byte
    // child.
    let mut bytes = vec![0x1a, 0x45, 0xdf, 0xa3, 0x82];
    bytes.extend(el(&[0x42, 0x86], &[1]));

    let mut reader = EbmlReader::from_buffer(bytes);
    let mut head = reader.read_element(false).unwrap().unwrap();
    assert!(matches!(head.next_child(false), Err(Error::DecodeError(_))));
}

#[test]
fn unseekable_sources_use_eager_paths() {
    let source = ReadOnlySource::new(Cursor::new(matroska_file()));
    let mut reader = EbmlReader::new(Box::new(source));
    assert!(!reader.is_seekable());

    let mut head = reader.read_element(true).unwrap().unwrap();
    assert_eq!(head.elem_pos(), None);
    assert_eq!(head.data_pos(), None);

    head.populate_children(true, true).unwrap();
    let doc_type = head.children_by_name("DocType");
    assert!(matches!(doc_type[0].value(), Value::Str(s) if s == "matroska"));

    let mut segment = reader.read_element(true).unwrap().unwrap();
    segment.populate_children(true, true).unwrap();

    let cluster = segment.children_by_name("Cluster");
    let block = cluster[0].children_by_name("SimpleBlock");
    assert!(matches!(block[0].value(), Value::Binary(b) if b.as_ref() == &SIMPLE_BLOCK_PAYLOAD));
}

#[test]
fn closed_reader_fails_cleanly() {
    let mut reader = EbmlReader::from_buffer(matroska_file());
    let mut head = reader.read_element(false).unwrap().unwrap();

    reader.close();
    assert!(!reader.is_open());

    assert!(matches!(head.next_child(false), Err(Error::LifecycleError(_))));
    assert!(matches!(reader.read_element(false), Err(Error::LifecycleError(_))));
}

#[test]
fn skip_requires_untouched_position() {
    let mut reader = EbmlReader::from_buffer(matroska_file());

    let mut head = reader.read_element(false).unwrap().unwrap();
    head.next_child(false).unwrap();

    assert!(matches!(head.skip(), Err(Error::LifecycleError(_))));
}

#[test]
fn seek_id_resolves_through_the_schema() {
    let mut seek = Vec::new();
    seek.extend(el(&[0x53, 0xab], &[0x15, 0x49, 0xa9, 0x66])); // SeekID -> Info
    seek.extend(el(&[0x53, 0xac], &[0x40])); // SeekPosition

    let seek_head = el(&[0x11, 0x4d, 0x9b, 0x74], &el(&[0x4d, 0xbb], &seek));
    let bytes = el(&[0x18, 0x53, 0x80, 0x67], &seek_head);

    let mut reader = EbmlReader::from_buffer(bytes);
    let mut segment = reader.read_element(false).unwrap().unwrap();
    segment.populate_children(true, false).unwrap();

    let seeks = segment.children_by_name("SeekHead")[0].children_by_name("Seek");
    let seek_id = seeks[0].children_by_name("SeekID");

    match seek_id[0].value() {
        Value::EbmlId { id, entry } => {
            assert_eq!(id, "1549a966");
            assert_eq!(entry.map(|e| e.name), Some("Info"));
        }
        other => panic!("expected an ebml id value, got {:?}", other),
    }

    let position = seeks[0].children_by_name("SeekPosition");
    assert!(matches!(position[0].value(), Value::Uint(0x40)));
}

#[test]
fn skip_typed_elements_produce_no_value() {
    let mut group = Vec::new();
    group.extend(el(&[0xa2], &[0xde, 0xad])); // BlockVirtual, schema type Skip
    group.extend(el(&[0x9b], &[0x07])); // BlockDuration

    let bytes = el(&[0xa0], &group);

    let mut reader = EbmlReader::from_buffer(bytes);
    let mut block_group = reader.read_element(false).unwrap().unwrap();
    block_group.populate_children(false, false).unwrap();

    let virt = block_group.children_by_name("BlockVirtual");
    assert!(matches!(virt[0].value(), Value::None));

    // The skipped content did not disturb the following sibling.
    let duration = block_group.children_by_name("BlockDuration");
    assert!(matches!(duration[0].value(), Value::Uint(7)));
}
