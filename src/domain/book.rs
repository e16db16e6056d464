use serde::{Deserialize, Serialize};

use super::{BookId, CategoryId, LoanError, PersonId};

/// 書籍エンティティ
///
/// `person_id`が貸出状態そのもの：`None`なら棚にあり、`Some`なら貸出中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub person_id: Option<PersonId>,
}

/// 採番前の書籍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub person_id: Option<PersonId>,
}

/// 貸出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    OnShelf,
    OnLoan(PersonId),
}

impl Book {
    pub fn loan_state(&self) -> LoanState {
        match self.person_id {
            Some(person_id) => LoanState::OnLoan(person_id),
            None => LoanState::OnShelf,
        }
    }

    pub fn is_on_loan(&self) -> bool {
        matches!(self.loan_state(), LoanState::OnLoan(_))
    }
}

/// 書籍を貸し出す（純粋な関数）
///
/// 棚にある書籍のみ貸出可能。
pub fn lend(book: Book, borrower: PersonId) -> Result<Book, LoanError> {
    match book.loan_state() {
        LoanState::OnLoan(_) => Err(LoanError::AlreadyLoaned),
        LoanState::OnShelf => Ok(Book {
            person_id: Some(borrower),
            ..book
        }),
    }
}

/// 書籍を返却する（純粋な関数）
///
/// 貸出中の書籍のみ返却可能。
pub fn return_book(book: Book) -> Result<Book, LoanError> {
    match book.loan_state() {
        LoanState::OnShelf => Err(LoanError::NotLoaned),
        LoanState::OnLoan(_) => Ok(Book {
            person_id: None,
            ..book
        }),
    }
}

/// 削除可能か確認する
///
/// 貸出中の書籍は削除できない。
pub fn ensure_removable(book: &Book) -> Result<(), LoanError> {
    if book.is_on_loan() {
        return Err(LoanError::OnLoan);
    }
    Ok(())
}
