//! Object key conventions.
//!
//! Pure string functions, no I/O. These define the canonical layout of
//! records in the Lumina data directory.

use uuid::Uuid;

pub const PATIENTS_PREFIX: &str = "patients/";

pub fn patient(id: Uuid) -> String {
    format!("patients/{id}.json")
}

pub fn analyses_prefix(patient_id: Uuid) -> String {
    format!("analyses/{patient_id}/")
}

pub fn analysis(patient_id: Uuid, id: Uuid) -> String {
    format!("analyses/{patient_id}/{id}.json")
}

pub fn phase(patient_id: Uuid) -> String {
    format!("phases/{patient_id}.json")
}

pub const SHARES_PREFIX: &str = "shares/";

pub fn share(token: Uuid) -> String {
    format!("shares/{token}.json")
}
