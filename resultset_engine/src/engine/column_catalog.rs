use crate::engine::batch::ResultBatch;
use crate::engine::context::ConnectionContext;
use crate::engine::data_type::{DataTypeCategory, DataTypeIndex};
use crate::error::{ResultSetError, Result};
use crate::protocol::types::{ColumnFlags, FieldMetadata, FieldType, BINARY_CHARSET_NUMBER};
use std::collections::HashMap;

/// Column as exposed to consumers of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub origin_name: String,
    pub flags: ColumnFlags,
    pub data_type: DataTypeIndex,
    pub category: DataTypeCategory,
}

/// Derives the concrete type tag of a field.
///
/// ENUM and SET values arrive as strings; the flag bits tell them apart.
/// Binary string data is recognised by charset 63 on unicode connections and
/// by the BINARY flag otherwise.
pub fn data_type_of_field(field: &FieldMetadata, unicode: bool) -> DataTypeIndex {
    if field.field_type == FieldType::String {
        if field.flags.contains(ColumnFlags::ENUM) {
            return DataTypeIndex::Enum;
        } else if field.flags.contains(ColumnFlags::SET) {
            return DataTypeIndex::Set;
        }
    }

    let is_binary = if unicode {
        field.charset_nr == BINARY_CHARSET_NUMBER
    } else {
        field.flags.contains(ColumnFlags::BINARY)
    };

    DataTypeIndex::from_field_type(field.field_type, is_binary)
}

/// Column descriptors of one execution plus the name lookup built with them.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<ColumnDescriptor>,
    indexes: HashMap<String, usize>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one descriptor per field of `batch`, in driver order.
    pub fn from_batch<B: ResultBatch + ?Sized>(batch: &B, ctx: &ConnectionContext) -> Result<Self> {
        let count = batch.field_count();
        let mut catalog = Self {
            columns: Vec::with_capacity(count),
            indexes: HashMap::with_capacity(count),
        };

        for i in 0..count {
            let field = batch.field(i).ok_or_else(|| {
                ResultSetError::InternalConsistency(format!(
                    "field #{} of {} not reported by driver",
                    i, count
                ))
            })?;
            catalog.push(field, ctx);
        }

        Ok(catalog)
    }

    fn push(&mut self, field: &FieldMetadata, ctx: &ConnectionContext) {
        let origin_name = if ctx.reports_origin_names() {
            field.org_name.clone()
        } else {
            field.name.clone()
        };
        let data_type = data_type_of_field(field, ctx.unicode);

        // Duplicate names keep the first ordinal.
        self.indexes
            .entry(field.name.clone())
            .or_insert(self.columns.len());
        self.columns.push(ColumnDescriptor {
            name: field.name.clone(),
            origin_name,
            flags: field.flags,
            data_type,
            category: data_type.category(),
        });
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indexes.get(name).copied()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.indexes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::row_buffer::BufferedBatch;

    fn unicode() -> ConnectionContext {
        ConnectionContext::new(50700, true)
    }

    #[test]
    fn test_enum_flag_on_string_type() {
        let field = FieldMetadata::new("status", FieldType::String).with_flags(ColumnFlags::ENUM);
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Enum);
        assert_eq!(data_type_of_field(&field, false), DataTypeIndex::Enum);
    }

    #[test]
    fn test_set_flag_on_string_type() {
        let field = FieldMetadata::new("tags", FieldType::String).with_flags(ColumnFlags::SET);
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Set);
    }

    #[test]
    fn test_enum_flag_ignored_on_non_string_type() {
        let field = FieldMetadata::new("n", FieldType::VarString).with_flags(ColumnFlags::ENUM);
        assert_eq!(data_type_of_field(&field, true), DataTypeIndex::Varchar);
    }

    #[test]
    fn test_unicode_mode_uses_charset() {
        // BINARY flag alone is not enough on a unicode connection.
        let flagged =
            FieldMetadata::new("b", FieldType::Blob).with_flags(ColumnFlags::BINARY);
        assert_eq!(data_type_of_field(&flagged, true), DataTypeIndex::Text);

        let charset = FieldMetadata::new("b", FieldType::Blob).with_charset(BINARY_CHARSET_NUMBER);
        assert_eq!(data_type_of_field(&charset, true), DataTypeIndex::Blob);
    }

    #[test]
    fn test_non_unicode_mode_uses_binary_flag() {
        let flagged =
            FieldMetadata::new("b", FieldType::VarString).with_flags(ColumnFlags::BINARY);
        assert_eq!(data_type_of_field(&flagged, false), DataTypeIndex::VarBinary);

        let charset =
            FieldMetadata::new("b", FieldType::VarString).with_charset(BINARY_CHARSET_NUMBER);
        assert_eq!(data_type_of_field(&charset, false), DataTypeIndex::Varchar);
    }

    #[test]
    fn test_classification_is_pure() {
        let fields = [
            FieldMetadata::new("a", FieldType::String).binary(),
            FieldMetadata::new("b", FieldType::Geometry),
            FieldMetadata::new("c", FieldType::String).with_flags(ColumnFlags::SET),
        ];
        let first: Vec<_> = fields.iter().map(|f| data_type_of_field(f, true)).collect();
        let reversed: Vec<_> = fields
            .iter()
            .rev()
            .map(|f| data_type_of_field(f, true))
            .rev()
            .collect();
        assert_eq!(first, reversed);
    }

    #[test]
    fn test_from_batch_builds_descriptors_and_index() {
        let batch = BufferedBatch::new(vec![
            FieldMetadata::new("id", FieldType::Long).with_flags(ColumnFlags::PRIMARY_KEY),
            FieldMetadata::new("name", FieldType::VarString).with_org_name("full_name"),
            FieldMetadata::new("photo", FieldType::Blob).binary(),
        ]);
        let catalog = ColumnCatalog::from_batch(&batch, &unicode()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.index_of("name"), Some(1));
        assert_eq!(catalog.index_of("full_name"), None);
        let name = catalog.get(1).unwrap();
        assert_eq!(name.origin_name, "full_name");
        assert_eq!(name.category, DataTypeCategory::Text);
        let photo = catalog.get(2).unwrap();
        assert_eq!(photo.data_type, DataTypeIndex::Blob);
        assert_eq!(photo.category, DataTypeCategory::Binary);
        assert!(catalog.get(0).unwrap().flags.contains(ColumnFlags::PRIMARY_KEY));
    }

    #[test]
    fn test_old_server_origin_name_falls_back() {
        let batch = BufferedBatch::new(vec![
            FieldMetadata::new("alias", FieldType::Long).with_org_name("id")
        ]);
        let catalog =
            ColumnCatalog::from_batch(&batch, &ConnectionContext::new(40000, true)).unwrap();
        assert_eq!(catalog.get(0).unwrap().origin_name, "alias");
    }

    #[test]
    fn test_duplicate_names_keep_first_ordinal() {
        let batch = BufferedBatch::new(vec![
            FieldMetadata::new("id", FieldType::Long),
            FieldMetadata::new("id", FieldType::Long),
        ]);
        let catalog = ColumnCatalog::from_batch(&batch, &unicode()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.index_of("id"), Some(0));
    }

    struct MissingFieldBatch;

    impl ResultBatch for MissingFieldBatch {
        fn row_count(&self) -> u64 {
            0
        }
        fn field_count(&self) -> usize {
            2
        }
        fn field(&self, _index: usize) -> Option<&FieldMetadata> {
            None
        }
        fn data_seek(&mut self, _offset: u64) {}
        fn fetch_row(&mut self) -> Option<crate::engine::batch::RawRow> {
            None
        }
        fn fetch_lengths(&self) -> Option<&[u64]> {
            None
        }
    }

    #[test]
    fn test_unresolvable_field_is_internal_consistency() {
        let err = ColumnCatalog::from_batch(&MissingFieldBatch, &unicode()).unwrap_err();
        assert!(matches!(err, ResultSetError::InternalConsistency(_)));
    }
}
