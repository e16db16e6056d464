use serde::{Deserialize, Serialize};

use super::CategoryId;

/// カテゴリエンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
