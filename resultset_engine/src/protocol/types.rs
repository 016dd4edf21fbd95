use bitflags::bitflags;

/// Character set id the server attaches to binary string data.
pub const BINARY_CHARSET_NUMBER: u16 = 63;

/// Character set id used for text data produced by the ODBC backend.
pub const UTF8_CHARSET_NUMBER: u16 = 33;

/// Lowest server version (`major * 10000 + minor * 100 + patch`) that reports
/// origin column names.
pub const ORIGIN_NAME_MIN_SERVER_VERSION: u32 = 40100;

/// Wire-level column type as reported in field metadata.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Decimal = 0x00,
    Tiny = 0x01,
    Short = 0x02,
    Long = 0x03,
    Float = 0x04,
    Double = 0x05,
    Null = 0x06,
    Timestamp = 0x07,
    LongLong = 0x08,
    Int24 = 0x09,
    Date = 0x0a,
    Time = 0x0b,
    DateTime = 0x0c,
    Year = 0x0d,
    NewDate = 0x0e,
    Varchar = 0x0f,
    Bit = 0x10,
    Json = 0xf5,
    NewDecimal = 0xf6,
    Enum = 0xf7,
    Set = 0xf8,
    TinyBlob = 0xf9,
    MediumBlob = 0xfa,
    LongBlob = 0xfb,
    Blob = 0xfc,
    VarString = 0xfd,
    String = 0xfe,
    Geometry = 0xff,
}

impl FieldType {
    /// Unknown codes are reported as `Null` so that classification lands in
    /// the `Other` category.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::Decimal,
            0x01 => Self::Tiny,
            0x02 => Self::Short,
            0x03 => Self::Long,
            0x04 => Self::Float,
            0x05 => Self::Double,
            0x07 => Self::Timestamp,
            0x08 => Self::LongLong,
            0x09 => Self::Int24,
            0x0a => Self::Date,
            0x0b => Self::Time,
            0x0c => Self::DateTime,
            0x0d => Self::Year,
            0x0e => Self::NewDate,
            0x0f => Self::Varchar,
            0x10 => Self::Bit,
            0xf5 => Self::Json,
            0xf6 => Self::NewDecimal,
            0xf7 => Self::Enum,
            0xf8 => Self::Set,
            0xf9 => Self::TinyBlob,
            0xfa => Self::MediumBlob,
            0xfb => Self::LongBlob,
            0xfc => Self::Blob,
            0xfd => Self::VarString,
            0xfe => Self::String,
            0xff => Self::Geometry,
            _ => Self::Null,
        }
    }
}

bitflags! {
    /// Column flag bits carried with field metadata.
    pub struct ColumnFlags: u32 {
        const NOT_NULL       = 0x0001;
        const PRIMARY_KEY    = 0x0002;
        const UNIQUE_KEY     = 0x0004;
        const MULTIPLE_KEY   = 0x0008;
        const BLOB           = 0x0010;
        const UNSIGNED       = 0x0020;
        const ZEROFILL       = 0x0040;
        const BINARY         = 0x0080;
        const ENUM           = 0x0100;
        const AUTO_INCREMENT = 0x0200;
        const TIMESTAMP      = 0x0400;
        const SET            = 0x0800;
        const NO_DEFAULT_VALUE = 0x1000;
        const ON_UPDATE_NOW  = 0x2000;
        const NUM            = 0x8000;
    }
}

impl Default for ColumnFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Metadata the driver reports for one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub name: String,
    pub org_name: String,
    pub field_type: FieldType,
    pub flags: ColumnFlags,
    pub charset_nr: u16,
}

impl FieldMetadata {
    /// Text field with the same origin name and the UTF-8 character set.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            org_name: name.clone(),
            name,
            field_type,
            flags: ColumnFlags::empty(),
            charset_nr: UTF8_CHARSET_NUMBER,
        }
    }

    pub fn with_org_name(mut self, org_name: impl Into<String>) -> Self {
        self.org_name = org_name.into();
        self
    }

    pub fn with_flags(mut self, flags: ColumnFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Marks the field as binary the way servers do: charset 63 plus the
    /// BINARY flag.
    pub fn binary(mut self) -> Self {
        self.charset_nr = BINARY_CHARSET_NUMBER;
        self.flags |= ColumnFlags::BINARY;
        self
    }

    pub fn with_charset(mut self, charset_nr: u16) -> Self {
        self.charset_nr = charset_nr;
        self
    }
}
