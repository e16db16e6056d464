use thiserror::Error;

/// 入力値のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が未指定・null・空文字・空白のみ（項目名はログ・テスト用）
    #[error("Faltan datos")]
    Missing(&'static str),

    /// 型が不正（文字列を期待したが数値だった等）
    #[error("Se enviaron datos invalidos")]
    InvalidType(&'static str),

    /// 書籍登録で名前またはカテゴリが欠けている
    #[error("Nombre y categoria son datos obligatorios")]
    NameAndCategoryRequired,

    /// リクエストボディがJSONオブジェクトとして読めない
    #[error("Se enviaron datos invalidos")]
    MalformedBody,
}

/// 貸出状態遷移のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// 既に貸出中のため貸し出せない
    #[error("Ese libro está prestado, no se puede prestar hasta que no se devuelva")]
    AlreadyLoaned,

    /// 貸出中ではないため返却できない
    #[error("Ese libro no estaba prestado")]
    NotLoaned,

    /// 貸出中のため削除できない
    #[error("Ese libro esta prestado, no se puede borrar")]
    OnLoan,
}

/// 人物更新のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonUpdateError {
    /// 登録済みのメールアドレスは変更できない
    #[error("El email no se puede modificar")]
    EmailImmutable,
}
