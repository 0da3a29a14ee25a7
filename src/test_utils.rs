//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::dataset::BlobCodec;
use crate::types::{
    DatasetCollection,
    TranslationMap,
};

/// 圧縮しない `BlobCodec`（ブロブがそのまま JSON になる）
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PlainCodec;

impl BlobCodec for PlainCodec {
    fn compress(&self, text: &str) -> String {
        text.to_string()
    }

    fn decompress(&self, blob: &str) -> Option<String> {
        Some(blob.to_string())
    }
}

/// テスト用の `DatasetCollection` を作成する
///
/// # Arguments
/// * `tables` - テーブル名と CSV テキストの組
pub(crate) fn collection(tables: &[(&str, &str)]) -> DatasetCollection {
    tables.iter().map(|(name, csv)| ((*name).to_string(), (*csv).to_string())).collect()
}

/// テスト用の `TranslationMap` を作成する
///
/// # Arguments
/// * `tables` - テーブル名と（原文, 訳文）の組
pub(crate) fn translations(tables: &[(&str, &[(&str, &str)])]) -> TranslationMap {
    tables
        .iter()
        .map(|(table, entries)| {
            let entries = entries
                .iter()
                .map(|(original, translated)| {
                    ((*original).to_string(), (*translated).to_string())
                })
                .collect();
            ((*table).to_string(), entries)
        })
        .collect()
}
