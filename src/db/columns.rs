use rusqlite::types::ValueRef;
use rusqlite::Row;

/// Read a display name the way SQLite's own text conversion would: NULL is
/// empty, numbers are formatted, text and blobs are decoded lossily.
pub(crate) fn name_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    })
}

/// Read a standings counter. Rows that only record membership leave the
/// counters NULL, which counts as zero.
pub(crate) fn stat_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or_default())
}
