//! Deepfake Detector CLI
//!
//! 画像を解析APIへ送り、判定結果を表示する。

pub mod cli;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod intake;
pub mod render;
pub mod session;
