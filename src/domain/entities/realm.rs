//! Realm Entity
//!
//! 조직(테넌트) 경계입니다. 모든 사용자는 정확히 하나의 realm에 속합니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realm {
    #[serde(rename = "_id")]
    pub id: i64,
    /// URL 서브도메인 등에 쓰이는 문자열 식별자
    pub string_id: String,
    pub name: String,
    #[serde(default)]
    pub deactivated: bool,
}

impl Realm {
    pub fn new(id: i64, string_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            string_id: string_id.into(),
            name: name.into(),
            deactivated: false,
        }
    }

    /// 사용자가 이 realm 소속인지 확인합니다.
    pub fn contains(&self, realm_id: i64) -> bool {
        self.id == realm_id
    }
}
