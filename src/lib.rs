//! pb-translator
//!
//! Pathbuilder のデータセット（テーブル名 → CSV）に翻訳を重ねるためのライブラリ。
//! 原文は変更せず、訳文はキーバリューストアに保存し、ホスト側のストアへ
//! パッチ済みのデータセットを書き戻す。

pub mod app;
pub mod apply;
pub mod config;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod patch;
pub mod policy;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod types;
pub mod view;

pub use app::{
    FileTranslator,
    Translator,
};
pub use error::{
    Error,
    Result,
};
