use thiserror::Error;

/// ストア操作のエラー
///
/// 一意制約・外部キー制約の違反はアプリケーション層で業務エラーに変換される。
/// それ以外の障害は`Backend`として透過的に伝播する。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 一意制約違反（制約名）
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// 外部キー制約違反（制約名）
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// 接続断などのストア障害
    #[error("store backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// スキーマ上の制約名
pub mod constraints {
    pub const BOOK_NAME_KEY: &str = "libro_nombre_key";
    pub const BOOK_CATEGORY_FKEY: &str = "libro_categoria_id_fkey";
    pub const BOOK_PERSON_FKEY: &str = "libro_persona_id_fkey";
    pub const CATEGORY_NAME_KEY: &str = "categoria_nombre_key";
    pub const PERSON_EMAIL_KEY: &str = "persona_email_key";
}
