//! Record reshaping for the table sync.
//!
//! Source rows look like `{id, animal, createdAt, description, name, ...}`;
//! destination rows look like `{choiceId, Animal, CreatedAt, Description, Name,
//! ImageUrl, ...}`. Identity renaming happens on the read path
//! ([`rename_identity`]), everything else in [`transform_record`].

use crate::config::sync::{CreatedAtFormat, TransformOptions};
use crate::domain::model::{FieldValue, Record};
use crate::utils::error::{EtlError, Result};
use chrono::DateTime;

/// Plain moves applied after `ImageUrl` and `CreatedAt` are handled.
const RENAMES: [(&str, &str); 3] = [
    ("animal", "Animal"),
    ("description", "Description"),
    ("name", "Name"),
];

/// Moves `from` to `to` in place. `index` only feeds the error message.
pub fn rename_identity(record: &mut Record, from: &str, to: &str, index: usize) -> Result<()> {
    let value = record
        .data
        .remove(from)
        .ok_or_else(|| EtlError::MissingFieldError {
            record: index,
            field: from.to_string(),
        })?;
    record.data.insert(to.to_string(), value);
    Ok(())
}

/// Builds the destination row for `record` without touching the input.
pub fn transform_record(record: &Record, options: &TransformOptions, index: usize) -> Result<Record> {
    let mut output = record.clone();

    let animal = string_field(record, "animal", index)?;
    let created_at = string_field(record, "createdAt", index)?;
    for (from, _) in RENAMES {
        if !record.data.contains_key(from) {
            return Err(EtlError::MissingFieldError {
                record: index,
                field: from.to_string(),
            });
        }
    }

    // ImageUrl 取自改名前的 animal
    output.data.insert(
        "ImageUrl".to_string(),
        FieldValue::S(options.image_url_template.replace("{subject}", animal)),
    );

    output.data.remove("createdAt");
    output.data.insert(
        "CreatedAt".to_string(),
        FieldValue::S(reformat_created_at(created_at, options.created_at_format, index)?),
    );

    for (from, to) in RENAMES {
        if let Some(value) = output.data.remove(from) {
            output.data.insert(to.to_string(), value);
        }
    }

    Ok(output)
}

/// Transforms a batch; the first bad record aborts the whole batch.
pub fn transform_all(records: &[Record], options: &TransformOptions) -> Result<Vec<Record>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| transform_record(record, options, index))
        .collect()
}

pub fn reformat_created_at(value: &str, format: CreatedAtFormat, index: usize) -> Result<String> {
    match format {
        CreatedAtFormat::Legacy => Ok(value.replace('-', "/")),
        CreatedAtFormat::Documented => {
            let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
                EtlError::FieldTypeError {
                    record: index,
                    field: "createdAt".to_string(),
                    expected: format!("an RFC 3339 timestamp ({})", e),
                }
            })?;
            Ok(parsed
                .with_timezone(&chrono::Utc)
                .format("%Y/%m/%d:%H:%M:%S %z")
                .to_string())
        }
    }
}

fn string_field<'a>(record: &'a Record, field: &str, index: usize) -> Result<&'a str> {
    match record.get(field) {
        Some(FieldValue::S(value)) => Ok(value),
        Some(_) => Err(EtlError::FieldTypeError {
            record: index,
            field: field.to_string(),
            expected: "a string".to_string(),
        }),
        None => Err(EtlError::MissingFieldError {
            record: index,
            field: field.to_string(),
        }),
    }
}
