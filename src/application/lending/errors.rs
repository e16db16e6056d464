use crate::domain::{LoanError, PersonUpdateError, ValidationError};
use crate::ports::StoreError;
use thiserror::Error;

/// 貸出記録アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LendingError {
    /// 入力値が不正
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 書籍が存在しない（メッセージは操作ごとに`not_found`から選ぶ）
    #[error("{0}")]
    BookNotFound(&'static str),

    /// カテゴリが存在しない
    #[error("{0}")]
    CategoryNotFound(&'static str),

    /// 人物が存在しない
    #[error("{0}")]
    PersonNotFound(&'static str),

    /// 同名の書籍が登録済み
    #[error("Ese libro ya existe")]
    DuplicateBookName,

    /// 同名のカテゴリが登録済み
    #[error("Ese nombre de categoria ya existe")]
    DuplicateCategoryName,

    /// メールアドレスが登録済み
    #[error("La direccion de email ya se encuentra registrada")]
    DuplicateEmail,

    /// カテゴリを参照する書籍がある
    #[error("Categoria con libro asociado, no se puede eliminar")]
    CategoryHasBooks,

    /// 人物が書籍を借りている
    #[error("Esa persona tiene libros asociados, no se puede eliminar")]
    PersonHasLoans,

    /// 貸出状態の遷移が不正
    #[error(transparent)]
    Loan(#[from] LoanError),

    /// メールアドレスの変更要求
    #[error(transparent)]
    PersonUpdate(#[from] PersonUpdateError),

    /// ストアのエラー
    #[error("Store error")]
    Store(#[source] StoreError),
}

/// 「見つからない」場合のメッセージ
///
/// 同じリソースでも、どの操作で見つからなかったかによって文言が異なる。
pub mod not_found {
    pub const BOOK: &str = "No se encuentra ese libro";
    pub const BOOK_TO_DELETE: &str = "No se encuentra este libro";
    pub const BOOK_TO_RETURN: &str = "Ese libro no existe";
    pub const BOOK_TO_LEND: &str = "No se encontró el libro";

    pub const CATEGORY: &str = "Categoria no encontrada";
    /// 書籍登録・カテゴリ削除で指定されたカテゴリ
    pub const REFERENCED_CATEGORY: &str = "No existe la categoria indicada";

    pub const PERSON: &str = "Persona no encontrada";
    pub const PERSON_TO_UPDATE: &str = "No se encuentra esa persona";
    /// 書籍登録時に借り手として指定された人物
    pub const REFERENCED_PERSON: &str = "No existe la persona indicada";
    pub const BORROWER: &str = "No se encontró la persona a la que se quiere prestar el libro";
}

/// 失敗の分類（HTTPステータスへの対応付けに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Forbidden,
    Store,
}

impl LendingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingError::Validation(_) => ErrorKind::Validation,
            LendingError::BookNotFound(_)
            | LendingError::CategoryNotFound(_)
            | LendingError::PersonNotFound(_) => ErrorKind::NotFound,
            LendingError::DuplicateBookName
            | LendingError::DuplicateCategoryName
            | LendingError::DuplicateEmail
            | LendingError::CategoryHasBooks
            | LendingError::PersonHasLoans
            | LendingError::Loan(_) => ErrorKind::Conflict,
            LendingError::PersonUpdate(_) => ErrorKind::Forbidden,
            LendingError::Store(_) => ErrorKind::Store,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
