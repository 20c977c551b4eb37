//! 画像選択から結果確定までの1セッション
//!
//! ワークフロー（状態）とクライアント（送信）をつなぐ。

use crate::client::DetectorClient;
use crate::error::Result;
use crate::intake::load_file;
use deepfake_detector_common::{
    AnalysisResult, DetectionMethod, IntakeLimits, Prepared, SelectedFile, UploadState, Workflow,
};
use std::path::Path;

pub struct Session {
    workflow: Workflow,
    client: DetectorClient,
}

impl Session {
    pub fn new(client: DetectorClient, limits: IntakeLimits, method: DetectionMethod) -> Self {
        Self {
            workflow: Workflow::new(limits, method),
            client,
        }
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn client(&self) -> &DetectorClient {
        &self.client
    }

    pub fn set_method(&mut self, method: DetectionMethod) -> Result<()> {
        self.workflow.set_method(method)?;
        Ok(())
    }

    pub fn select_file(&mut self, file: &SelectedFile) -> Result<UploadState> {
        Ok(self.workflow.select_file(file)?)
    }

    /// パスから画像を読み込んで選択する
    pub fn select_path(&mut self, path: &Path) -> Result<UploadState> {
        let file = load_file(path)?;
        self.select_file(&file)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.workflow.clear()?;
        Ok(())
    }

    /// 解析して結果を確定させる
    ///
    /// 送信に至った場合は必ずResolvedで終わる。別の解析が送信中なら
    /// 状態を変えずに `DispatchError::Busy` を返す。
    pub async fn analyze(&mut self) -> Result<AnalysisResult> {
        let _guard = self.client.reserve_analysis()?;

        let request = match self.workflow.begin_analysis()? {
            Prepared::Ready(request) => request,
            Prepared::Aborted(result) => return Ok(result),
        };

        let result = self.client.send_analysis(&request).await;
        self.workflow.complete_analysis(result.clone())?;
        Ok(result)
    }
}
