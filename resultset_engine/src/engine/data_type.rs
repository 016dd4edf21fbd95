use crate::protocol::types::FieldType;
use serde::Serialize;

/// Concrete column type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataTypeIndex {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    Year,
    DateTime,
    Timestamp,
    Char,
    Varchar,
    TinyText,
    Text,
    MediumText,
    LongText,
    Json,
    Binary,
    VarBinary,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Enum,
    Set,
    Bit,
    Geometry,
    Unknown,
}

/// Coarse classification that drives decoding and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataTypeCategory {
    Numeric,
    Temporal,
    Text,
    Binary,
    Spatial,
    Enum,
    Set,
    Other,
}

impl DataTypeCategory {
    /// Categories whose cells are kept byte for byte instead of read as UTF-8.
    pub fn is_byte_preserving(self) -> bool {
        matches!(self, DataTypeCategory::Binary | DataTypeCategory::Spatial)
    }
}

impl DataTypeIndex {
    pub fn category(self) -> DataTypeCategory {
        use DataTypeIndex::*;
        match self {
            TinyInt | SmallInt | MediumInt | Int | BigInt | Float | Double | Decimal | Bit => {
                DataTypeCategory::Numeric
            }
            Date | Time | Year | DateTime | Timestamp => DataTypeCategory::Temporal,
            Char | Varchar | TinyText | Text | MediumText | LongText | Json => {
                DataTypeCategory::Text
            }
            Binary | VarBinary | TinyBlob | Blob | MediumBlob | LongBlob => {
                DataTypeCategory::Binary
            }
            Geometry => DataTypeCategory::Spatial,
            Enum => DataTypeCategory::Enum,
            Set => DataTypeCategory::Set,
            Unknown => DataTypeCategory::Other,
        }
    }

    /// Fixed (wire type, is_binary) table. String-ish wire types split into a
    /// text and a binary tag; everything else ignores `is_binary`.
    pub fn from_field_type(field_type: FieldType, is_binary: bool) -> Self {
        use DataTypeIndex::*;
        let pick = |text: DataTypeIndex, bin: DataTypeIndex| if is_binary { bin } else { text };
        match field_type {
            FieldType::Tiny => TinyInt,
            FieldType::Short => SmallInt,
            FieldType::Int24 => MediumInt,
            FieldType::Long => Int,
            FieldType::LongLong => BigInt,
            FieldType::Float => Float,
            FieldType::Double => Double,
            FieldType::Decimal | FieldType::NewDecimal => Decimal,
            FieldType::Date | FieldType::NewDate => Date,
            FieldType::Time => Time,
            FieldType::Year => Year,
            FieldType::DateTime => DateTime,
            FieldType::Timestamp => Timestamp,
            FieldType::Bit => Bit,
            FieldType::Json => Json,
            FieldType::Enum => Enum,
            FieldType::Set => Set,
            FieldType::String => pick(Char, Binary),
            FieldType::Varchar | FieldType::VarString => pick(Varchar, VarBinary),
            FieldType::TinyBlob => pick(TinyText, TinyBlob),
            FieldType::Blob => pick(Text, Blob),
            FieldType::MediumBlob => pick(MediumText, MediumBlob),
            FieldType::LongBlob => pick(LongText, LongBlob),
            FieldType::Geometry => Geometry,
            FieldType::Null => Unknown,
        }
    }
}
