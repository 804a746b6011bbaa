use serde::Serialize;

/// Employee identity resolved from a secret key.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct KeyHolder {
    pub employee_id: u64,
    pub name: String,
    pub role_company: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct KeyHolderRow {
    pub secret_key: String,
    pub employee_id: u64,
    pub name: String,
    pub role_company: Option<String>,
}

impl From<KeyHolderRow> for (String, KeyHolder) {
    fn from(row: KeyHolderRow) -> Self {
        (
            row.secret_key,
            KeyHolder {
                employee_id: row.employee_id,
                name: row.name,
                role_company: row.role_company,
            },
        )
    }
}
