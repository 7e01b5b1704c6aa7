//! lazy-ui-translator
//!
//! UI 文字列の遅延翻訳キャッシュ。未翻訳のキーだけを生成言語モデルに問い合わせ、
//! 結果をキャッシュにマージして永続化する。

pub mod app;
pub mod config;
pub mod language;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod progress;
pub mod provider;
pub mod requester;
pub mod store;
pub mod theme;
pub mod translation;

#[cfg(test)]
mod test_utils;

pub use app::App;
pub use provider::{
    LanguageProvider,
    SelectionOutcome,
};
