use crate::errors;
use crate::sql::BindMetadata;
use crate::{BindValues, SqlbindError, Value};

/// Orders caller supplied values into the positional list the backend binds,
/// one entry per slot of `metadata`.
///
/// Numbered statements with gaps (`?1 ... ?3`) still take `arg_count` values;
/// the value for an unreferenced slot is passed through and never read.
pub fn map_binds(metadata: &BindMetadata, values: &BindValues) -> Result<Vec<Value>, SqlbindError> {
    if metadata.arg_count == 0 {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        return Err(errors::no_parameters_accepted_error());
    }

    let slots = match values {
        BindValues::Positional(values) => {
            if metadata.style.is_named() {
                return Err(errors::positional_with_named_error());
            }
            values.iter().cloned().map(Some).collect::<Vec<_>>()
        }
        BindValues::Named(values) => {
            if !metadata.style.is_named() {
                return Err(errors::named_without_named_error());
            }
            let mut slots: Vec<Option<Value>> = vec![None; metadata.arg_count];
            for (key, value) in values {
                let Some(slot) = metadata.slot(key) else {
                    return Err(errors::unknown_bind_parameter_error(key));
                };
                if slot >= slots.len() {
                    slots.resize(slot + 1, None);
                }
                slots[slot] = Some(value.clone());
            }
            slots
        }
    };

    let supplied = slots.iter().filter(|slot| slot.is_some()).count();
    if slots.len() != metadata.arg_count || supplied != metadata.arg_count {
        return Err(errors::bind_arity_error(metadata.arg_count, supplied));
    }

    Ok(slots.into_iter().flatten().collect())
}
