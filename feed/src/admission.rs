use common::JobRecord;
use serde_json::Value;

/// Why a feed entry was kept out of the paginated list.
#[derive(Debug, thiserror::Error)]
pub enum InvalidRecord {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("entry has no id")]
    MissingId,
    #[error("entry is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

fn admit_one(entry: Value) -> Result<JobRecord, InvalidRecord> {
    let Value::Object(fields) = &entry else {
        return Err(InvalidRecord::NotAnObject);
    };
    match fields.get("id") {
        None | Some(Value::Null) => return Err(InvalidRecord::MissingId),
        Some(_) => {}
    }
    serde_json::from_value(entry).map_err(InvalidRecord::Malformed)
}

/// Keeps the entries of a page that carry an id, in feed order.
///
/// Rejected entries are dropped silently apart from a debug log.
pub fn admit(entries: Vec<Value>) -> Vec<JobRecord> {
    let mut jobs = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match admit_one(entry) {
            Ok(job) => jobs.push(job),
            Err(reason) => tracing::debug!(position, %reason, "dropping feed entry"),
        }
    }
    jobs
}
