/// Port supplying the merge tokens offered by token fields.
pub trait TokenVocabulary: Send + Sync {
    /// Returns the tokens in display order.
    fn tokens(&self) -> Vec<String>;
}
