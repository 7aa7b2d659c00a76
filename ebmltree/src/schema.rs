// EbmlTree
// Copyright (c) 2025 The Project EbmlTree Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `schema` module is the static registry of known EBML elements: the
//! EBML header vocabulary plus the Matroska document type.
//!
//! Element names, IDs, and value types in the registry are the stable
//! contract used to consult parsed values. IDs absent from the registry are
//! legal in a stream; the element reader skips their content.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// How the content bytes of an element are to be interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValueType {
    /// A container whose content is a sequence of further elements.
    Master,
    /// A big-endian unsigned integer of 0 to 8 bytes.
    Uint,
    /// A big-endian two's-complement signed integer of 0 to 8 bytes.
    Sint,
    /// An IEEE 754 binary32 or binary64 float.
    Float,
    /// A UTF-8 string.
    Str,
    /// An opaque byte payload.
    Binary,
    /// The ID of another element, stored as raw ID bytes.
    EbmlId,
    /// Content with no useful interpretation; always skipped.
    Skip,
}

/// A registry entry describing one known element ID.
#[derive(Debug, Copy, Clone)]
pub struct SchemaEntry {
    /// The element name.
    pub name: &'static str,
    /// How the element's content is interpreted.
    pub value_type: ValueType,
    /// Whether the element may repeat among its siblings.
    pub multiple: bool,
    /// For masters, the IDs of the immediate children. The global `Void` and
    /// `CRC32` elements are additionally tolerated inside any master.
    pub children: Option<&'static [&'static str]>,
}

impl SchemaEntry {
    pub fn is_master(&self) -> bool {
        self.value_type == ValueType::Master
    }
}

/// Looks up the schema entry for a lowercase hex element ID.
pub fn lookup(id_hex: &str) -> Option<&'static SchemaEntry> {
    REGISTRY.get(id_hex)
}

const fn master(
    name: &'static str,
    multiple: bool,
    children: &'static [&'static str],
) -> SchemaEntry {
    SchemaEntry { name, value_type: ValueType::Master, multiple, children: Some(children) }
}

const fn leaf(name: &'static str, value_type: ValueType, multiple: bool) -> SchemaEntry {
    SchemaEntry { name, value_type, multiple, children: None }
}

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, SchemaEntry> = {
        use ValueType::*;
        let mut e = HashMap::new();
        // Global
        e.insert("ec", leaf("Void", Binary, true));
        e.insert("bf", leaf("CRC32", Binary, false));
        // \EBML
        e.insert("1a45dfa3", master("EBML", false, &[
            "4286", "42f7", "42f2", "42f3", "4282", "4287", "4285", "ec", "bf",
        ]));
        e.insert("4286", leaf("EBMLVersion", Uint, false));
        e.insert("42f7", leaf("EBMLReadVersion", Uint, false));
        e.insert("42f2", leaf("EBMLMaxIDLength", Uint, false));
        e.insert("42f3", leaf("EBMLMaxSizeLength", Uint, false));
        e.insert("4282", leaf("DocType", Str, false));
        e.insert("4287", leaf("DocTypeVersion", Uint, false));
        e.insert("4285", leaf("DocTypeReadVersion", Uint, false));
        // \Segment
        e.insert("18538067", master("Segment", true, &[
            "114d9b74", "1549a966", "1f43b675", "1654ae6b", "1c53bb6b", "1941a469",
            "1043a770", "1254c367", "ec", "bf",
        ]));
        // \Segment\SeekHead
        e.insert("114d9b74", master("SeekHead", true, &["4dbb", "ec", "bf"]));
        e.insert("4dbb", master("Seek", true, &["53ab", "53ac"]));
        e.insert("53ab", leaf("SeekID", EbmlId, false));
        e.insert("53ac", leaf("SeekPosition", Uint, false));
        // \Segment\Info
        e.insert("1549a966", master("Info", true, &[
            "73a4", "7384", "3cb923", "3c83ab", "3eb923", "3e83bb", "4444", "6924",
            "2ad7b1", "4489", "4461", "7ba9", "4d80", "5741",
        ]));
        e.insert("73a4", leaf("SegmentUID", Binary, false));
        e.insert("7384", leaf("SegmentFilename", Str, false));
        e.insert("3cb923", leaf("PrevUID", Binary, false));
        e.insert("3c83ab", leaf("PrevFilename", Str, false));
        e.insert("3eb923", leaf("NextUID", Binary, false));
        e.insert("3e83bb", leaf("NextFilename", Str, false));
        e.insert("4444", leaf("SegmentFamily", Binary, true));
        e.insert("6924", master("ChapterTranslate", true, &["69fc", "69bf", "69a5"]));
        e.insert("69fc", leaf("ChapterTranslateEditionUID", Uint, true));
        e.insert("69bf", leaf("ChapterTranslateCodec", Uint, false));
        e.insert("69a5", leaf("ChapterTranslateID", Binary, false));
        e.insert("2ad7b1", leaf("TimecodeScale", Uint, false));
        e.insert("4489", leaf("Duration", Float, false));
        e.insert("4461", leaf("DateUTC", Sint, false));
        e.insert("7ba9", leaf("Title", Str, false));
        e.insert("4d80", leaf("MuxingApp", Str, false));
        e.insert("5741", leaf("WritingApp", Str, false));
        // \Segment\Cluster
        e.insert("1f43b675", master("Cluster", true, &[
            "e7", "a7", "ab", "a3", "a0", "af", "ec", "bf",
        ]));
        e.insert("e7", leaf("Timecode", Uint, false));
        e.insert("a7", leaf("Position", Uint, false));
        e.insert("ab", leaf("PrevSize", Uint, false));
        e.insert("a3", leaf("SimpleBlock", Binary, true));
        e.insert("a0", master("BlockGroup", true, &[
            "a1", "a2", "75a1", "9b", "fb", "fa", "a4", "75a2", "8e",
        ]));
        e.insert("a1", leaf("Block", Binary, false));
        e.insert("a2", leaf("BlockVirtual", Skip, false));
        e.insert("75a1", master("BlockAdditions", false, &["a6"]));
        e.insert("a6", master("BlockMore", true, &["ee", "a5"]));
        e.insert("ee", leaf("BlockAddID", Uint, false));
        e.insert("a5", leaf("BlockAdditional", Binary, false));
        e.insert("9b", leaf("BlockDuration", Uint, false));
        e.insert("fb", leaf("ReferenceBlock", Sint, true));
        e.insert("fa", leaf("ReferencePriority", Uint, false));
        e.insert("a4", leaf("CodecState", Binary, false));
        e.insert("75a2", leaf("DiscardPadding", Sint, false));
        e.insert("8e", leaf("Slices", Skip, false));
        e.insert("af", leaf("EncryptedBlock", Skip, false));
        // \Segment\Tracks
        e.insert("1654ae6b", master("Tracks", true, &["ae", "ec", "bf"]));
        e.insert("ae", master("TrackEntry", true, &[
            "d7", "73c5", "83", "b9", "88", "55aa", "55ab", "55ac", "55ad", "55ae",
            "55af", "9c", "23e383", "536e", "22b59c", "86", "63a2", "258688", "56aa",
            "56bb", "e0", "e1", "6d80",
        ]));
        e.insert("d7", leaf("TrackNumber", Uint, false));
        e.insert("73c5", leaf("TrackUID", Uint, false));
        e.insert("83", leaf("TrackType", Uint, false));
        e.insert("b9", leaf("FlagEnabled", Uint, false));
        e.insert("88", leaf("FlagDefault", Uint, false));
        e.insert("55aa", leaf("FlagForced", Uint, false));
        e.insert("55ab", leaf("FlagHearingImpaired", Uint, false));
        e.insert("55ac", leaf("FlagVisualImpaired", Uint, false));
        e.insert("55ad", leaf("FlagTextDescriptions", Uint, false));
        e.insert("55ae", leaf("FlagOriginal", Uint, false));
        e.insert("55af", leaf("FlagCommentary", Uint, false));
        e.insert("9c", leaf("FlagLacing", Uint, false));
        e.insert("23e383", leaf("DefaultDuration", Uint, false));
        e.insert("536e", leaf("Name", Str, false));
        e.insert("22b59c", leaf("Language", Str, false));
        e.insert("86", leaf("CodecID", Str, false));
        e.insert("63a2", leaf("CodecPrivate", Binary, false));
        e.insert("258688", leaf("CodecName", Str, false));
        e.insert("56aa", leaf("CodecDelay", Uint, false));
        e.insert("56bb", leaf("SeekPreRoll", Uint, false));
        // \Segment\Tracks\TrackEntry\Video
        e.insert("e0", master("Video", false, &[
            "9a", "9d", "53b8", "53c0", "b0", "ba", "54aa", "54bb", "54cc", "54dd",
            "54b0", "54ba", "54b2", "54b3", "55b0", "7670",
        ]));
        e.insert("9a", leaf("FlagInterlaced", Uint, false));
        e.insert("9d", leaf("FieldOrder", Uint, false));
        e.insert("53b8", leaf("StereoMode", Uint, false));
        e.insert("53c0", leaf("AlphaMode", Uint, false));
        e.insert("b0", leaf("PixelWidth", Uint, false));
        e.insert("ba", leaf("PixelHeight", Uint, false));
        e.insert("54aa", leaf("PixelCropBottom", Uint, false));
        e.insert("54bb", leaf("PixelCropTop", Uint, false));
        e.insert("54cc", leaf("PixelCropLeft", Uint, false));
        e.insert("54dd", leaf("PixelCropRight", Uint, false));
        e.insert("54b0", leaf("DisplayWidth", Uint, false));
        e.insert("54ba", leaf("DisplayHeight", Uint, false));
        e.insert("54b2", leaf("DisplayUnit", Uint, false));
        e.insert("54b3", leaf("AspectRatioType", Uint, false));
        e.insert("55b0", master("Colour", false, &[
            "55b1", "55b2", "55b3", "55b4", "55b5", "55b6", "55b7", "55b8", "55b9",
            "55ba", "55bb", "55bc", "55bd", "55d0",
        ]));
        e.insert("55b1", leaf("MatrixCoefficients", Uint, false));
        e.insert("55b2", leaf("BitsPerChannel", Uint, false));
        e.insert("55b3", leaf("ChromaSubsamplingHorz", Uint, false));
        e.insert("55b4", leaf("ChromaSubsamplingVert", Uint, false));
        e.insert("55b5", leaf("CbSubsamplingHorz", Uint, false));
        e.insert("55b6", leaf("CbSubsamplingVert", Uint, false));
        e.insert("55b7", leaf("ChromaSitingHorz", Uint, false));
        e.insert("55b8", leaf("ChromaSitingVert", Uint, false));
        e.insert("55b9", leaf("Range", Uint, false));
        e.insert("55ba", leaf("TransferCharacteristics", Uint, false));
        e.insert("55bb", leaf("Primaries", Uint, false));
        e.insert("55bc", leaf("MaxCLL", Uint, false));
        e.insert("55bd", leaf("MaxFALL", Uint, false));
        e.insert("55d0", master("MasteringMetadata", false, &[
            "55d1", "55d2", "55d3", "55d4", "55d5", "55d6", "55d7", "55d8", "55d9",
            "55da",
        ]));
        e.insert("55d1", leaf("PrimaryRChromaticityX", Float, false));
        e.insert("55d2", leaf("PrimaryRChromaticityY", Float, false));
        e.insert("55d3", leaf("PrimaryGChromaticityX", Float, false));
        e.insert("55d4", leaf("PrimaryGChromaticityY", Float, false));
        e.insert("55d5", leaf("PrimaryBChromaticityX", Float, false));
        e.insert("55d6", leaf("PrimaryBChromaticityY", Float, false));
        e.insert("55d7", leaf("WhitePointChromaticityX", Float, false));
        e.insert("55d8", leaf("WhitePointChromaticityY", Float, false));
        e.insert("55d9", leaf("LuminanceMax", Float, false));
        e.insert("55da", leaf("LuminanceMin", Float, false));
        e.insert("7670", master("Projection", false, &[
            "7671", "7672", "7673", "7674", "7675",
        ]));
        e.insert("7671", leaf("ProjectionType", Uint, false));
        e.insert("7672", leaf("ProjectionPrivate", Binary, false));
        e.insert("7673", leaf("ProjectionPoseYaw", Float, false));
        e.insert("7674", leaf("ProjectionPosePitch", Float, false));
        e.insert("7675", leaf("ProjectionPoseRoll", Float, false));
        // \Segment\Tracks\TrackEntry\Audio
        e.insert("e1", master("Audio", false, &["b5", "78b5", "9f", "6264"]));
        e.insert("b5", leaf("SamplingFrequency", Float, false));
        e.insert("78b5", leaf("OutputSamplingFrequency", Float, false));
        e.insert("9f", leaf("Channels", Uint, false));
        e.insert("6264", leaf("BitDepth", Uint, false));
        // \Segment\Tracks\TrackEntry\ContentEncodings
        e.insert("6d80", master("ContentEncodings", false, &["6240"]));
        e.insert("6240", master("ContentEncoding", true, &[
            "5031", "5032", "5033", "5034", "5035",
        ]));
        e.insert("5031", leaf("ContentEncodingOrder", Uint, false));
        e.insert("5032", leaf("ContentEncodingScope", Uint, false));
        e.insert("5033", leaf("ContentEncodingType", Uint, false));
        e.insert("5034", master("ContentCompression", false, &["4254", "4255"]));
        e.insert("4254", leaf("ContentCompAlgo", Uint, false));
        e.insert("4255", leaf("ContentCompSettings", Binary, false));
        e.insert("5035", master("ContentEncryption", false, &["47e1", "47e2", "47e7"]));
        e.insert("47e1", leaf("ContentEncAlgo", Uint, false));
        e.insert("47e2", leaf("ContentEncKeyID", Binary, false));
        e.insert("47e7", master("ContentEncAESSettings", false, &["47e8"]));
        e.insert("47e8", leaf("AESSettingsCipherMode", Uint, false));
        // \Segment\Cues
        e.insert("1c53bb6b", master("Cues", false, &["bb", "ec", "bf"]));
        e.insert("bb", master("CuePoint", true, &["b3", "b7"]));
        e.insert("b3", leaf("CueTime", Uint, false));
        e.insert("b7", master("CueTrackPositions", true, &[
            "f7", "f1", "f0", "b2", "5378", "ea",
        ]));
        e.insert("f7", leaf("CueTrack", Uint, false));
        e.insert("f1", leaf("CueClusterPosition", Uint, false));
        e.insert("f0", leaf("CueRelativePosition", Uint, false));
        e.insert("b2", leaf("CueDuration", Uint, false));
        e.insert("5378", leaf("CueBlockNumber", Uint, false));
        e.insert("ea", leaf("CueCodecState", Uint, false));
        // \Segment\Attachments
        e.insert("1941a469", master("Attachments", false, &["61a7", "ec", "bf"]));
        e.insert("61a7", master("AttachedFile", true, &[
            "467e", "466e", "4660", "465c", "46ae",
        ]));
        e.insert("467e", leaf("FileDescription", Str, false));
        e.insert("466e", leaf("FileName", Str, false));
        e.insert("4660", leaf("FileMimeType", Str, false));
        e.insert("465c", leaf("FileData", Binary, false));
        e.insert("46ae", leaf("FileUID", Uint, false));
        // \Segment\Chapters
        e.insert("1043a770", master("Chapters", false, &["45b9", "ec", "bf"]));
        e.insert("45b9", master("EditionEntry", true, &[
            "45bc", "45bd", "45db", "45dd", "b6",
        ]));
        e.insert("45bc", leaf("EditionUID", Uint, false));
        e.insert("45bd", leaf("EditionFlagHidden", Uint, false));
        e.insert("45db", leaf("EditionFlagDefault", Uint, false));
        e.insert("45dd", leaf("EditionFlagOrdered", Uint, false));
        e.insert("b6", master("ChapterAtom", true, &[
            "73c4", "5654", "91", "92", "98", "4598", "63c3", "6e67", "6ebc", "8f",
            "80", "6944", "b6",
        ]));
        e.insert("73c4", leaf("ChapterUID", Uint, false));
        e.insert("5654", leaf("ChapterStringUID", Str, false));
        e.insert("91", leaf("ChapterTimeStart", Uint, false));
        e.insert("92", leaf("ChapterTimeEnd", Uint, false));
        e.insert("98", leaf("ChapterFlagHidden", Uint, false));
        e.insert("4598", leaf("ChapterFlagEnabled", Uint, false));
        e.insert("63c3", leaf("ChapterPhysicalEquiv", Uint, false));
        e.insert("6e67", leaf("ChapterSegmentUID", Binary, false));
        e.insert("6ebc", leaf("ChapterSegmentEditionUID", Uint, false));
        e.insert("8f", master("ChapterTrack", false, &["89"]));
        e.insert("89", leaf("ChapterTrackNumber", Uint, true));
        e.insert("80", master("ChapterDisplay", true, &["85", "437c", "437e"]));
        e.insert("85", leaf("ChapString", Str, false));
        e.insert("437c", leaf("ChapLanguage", Str, true));
        e.insert("437e", leaf("ChapCountry", Str, true));
        e.insert("6944", master("ChapProcess", true, &["6955", "450d", "6911"]));
        e.insert("6955", leaf("ChapProcessCodecID", Uint, false));
        e.insert("450d", leaf("ChapProcessPrivate", Binary, false));
        e.insert("6911", master("ChapProcessCommand", true, &["6922", "6933"]));
        e.insert("6922", leaf("ChapProcessTime", Uint, false));
        e.insert("6933", leaf("ChapProcessData", Binary, false));
        // \Segment\Tags
        e.insert("1254c367", master("Tags", true, &["7373", "ec", "bf"]));
        e.insert("7373", master("Tag", true, &["63c0", "67c8"]));
        e.insert("63c0", master("Targets", false, &[
            "68ca", "63ca", "63c5", "63c9", "63c4", "63c6",
        ]));
        e.insert("68ca", leaf("TargetTypeValue", Uint, false));
        e.insert("63ca", leaf("TargetType", Str, false));
        e.insert("63c5", leaf("TagTrackUID", Uint, true));
        e.insert("63c9", leaf("TagEditionUID", Uint, true));
        e.insert("63c4", leaf("TagChapterUID", Uint, true));
        e.insert("63c6", leaf("TagAttachmentUID", Uint, true));
        e.insert("67c8", master("SimpleTag", true, &[
            "45a3", "447a", "4484", "4487", "4485", "67c8",
        ]));
        e.insert("45a3", leaf("TagName", Str, false));
        e.insert("447a", leaf("TagLanguage", Str, false));
        e.insert("4484", leaf("TagDefault", Uint, false));
        e.insert("4487", leaf("TagString", Str, false));
        e.insert("4485", leaf("TagBinary", Binary, false));
        e
    };
}
