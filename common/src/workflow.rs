//! アップロード → 解析 → 結果表示 の状態機械
//!
//! 状態: Idle / ImageLoaded / Analyzing / Resolved
//!
//! 結果は常に1つまで。新しい画像の選択や解析開始で前の結果は消える。
//! 解析中は画像の変更・方式の変更・再解析を受け付けない。

use crate::error::WorkflowError;
use crate::intake::{select_file, IntakeLimits, SelectedFile};
use crate::request::{prepare_analysis, Prepared};
use crate::types::{AnalysisResult, DetectionMethod, UploadState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    ImageLoaded(UploadState),
    Analyzing(UploadState),
    Resolved(UploadState, AnalysisResult),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::ImageLoaded(_) => "image-loaded",
            Phase::Analyzing(_) => "analyzing",
            Phase::Resolved(_, _) => "resolved",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workflow {
    phase: Phase,
    method: DetectionMethod,
    limits: IntakeLimits,
}

impl Workflow {
    pub fn new(limits: IntakeLimits, method: DetectionMethod) -> Self {
        Self {
            phase: Phase::Idle,
            method,
            limits,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing(_))
    }

    pub fn upload(&self) -> Option<&UploadState> {
        match &self.phase {
            Phase::Idle => None,
            Phase::ImageLoaded(upload) | Phase::Analyzing(upload) | Phase::Resolved(upload, _) => {
                Some(upload)
            }
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Resolved(_, result) => Some(result),
            _ => None,
        }
    }

    /// 解析ボタンを出すか（画像があり、結果がまだない）
    pub fn can_analyze(&self) -> bool {
        matches!(self.phase, Phase::ImageLoaded(_))
    }

    fn ensure_idle_input(&self) -> Result<(), WorkflowError> {
        if self.is_analyzing() {
            Err(WorkflowError::Busy)
        } else {
            Ok(())
        }
    }

    pub fn set_method(&mut self, method: DetectionMethod) -> Result<(), WorkflowError> {
        self.ensure_idle_input()?;
        self.method = method;
        Ok(())
    }

    /// 画像を選択する
    ///
    /// 検証エラー時は状態を変えない。成功時は前の結果を捨てて ImageLoaded へ。
    pub fn select_file(&mut self, file: &SelectedFile) -> Result<UploadState, WorkflowError> {
        self.ensure_idle_input()?;
        let upload = select_file(file, &self.limits)?;
        log::debug!("{} -> image-loaded ({})", self.phase.name(), upload.file_name);
        self.phase = Phase::ImageLoaded(upload.clone());
        Ok(upload)
    }

    /// 画像を取り除く
    pub fn clear(&mut self) -> Result<(), WorkflowError> {
        self.ensure_idle_input()?;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// 解析を開始する
    ///
    /// 前の結果を消してから送信ペイロードを返す。Data URIが壊れていた場合は
    /// 送信せずに失敗結果で確定する。
    pub fn begin_analysis(&mut self) -> Result<Prepared, WorkflowError> {
        self.ensure_idle_input()?;
        let upload = match &self.phase {
            Phase::Idle => return Err(crate::error::ValidationError::MissingImage.into()),
            Phase::ImageLoaded(upload) | Phase::Resolved(upload, _) => upload.clone(),
            Phase::Analyzing(_) => return Err(WorkflowError::Busy),
        };

        let prepared = prepare_analysis(&upload, self.method)?;
        self.phase = match &prepared {
            Prepared::Ready(_) => Phase::Analyzing(upload),
            Prepared::Aborted(result) => Phase::Resolved(upload, result.clone()),
        };
        log::debug!("analysis started, phase={}", self.phase.name());
        Ok(prepared)
    }

    /// 解析結果を受け取る（Analyzing からのみ）
    pub fn complete_analysis(&mut self, result: AnalysisResult) -> Result<(), WorkflowError> {
        let upload = match std::mem::take(&mut self.phase) {
            Phase::Analyzing(upload) => upload,
            other => {
                self.phase = other;
                return Err(WorkflowError::NotAnalyzing);
            }
        };
        self.phase = Phase::Resolved(upload, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", b"\x89PNG\r\n\x1a\n".to_vec())
    }

    fn flagged() -> AnalysisResult {
        AnalysisResult::Success {
            is_ai: true,
            confidence_percent: 91,
            source_tag: None,
        }
    }

    #[test]
    fn test_starts_idle() {
        let workflow = Workflow::default();
        assert_eq!(workflow.phase(), &Phase::Idle);
        assert_eq!(workflow.method(), DetectionMethod::Advanced);
        assert!(workflow.upload().is_none());
        assert!(!workflow.can_analyze());
    }

    #[test]
    fn test_full_cycle() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        assert!(workflow.can_analyze());

        let prepared = workflow.begin_analysis().unwrap();
        assert!(matches!(prepared, Prepared::Ready(_)));
        assert!(workflow.is_analyzing());

        workflow.complete_analysis(flagged()).unwrap();
        assert_eq!(workflow.result(), Some(&flagged()));
        assert_eq!(workflow.upload().unwrap().file_name, "a.png");
    }

    #[test]
    fn test_new_selection_clears_previous_result() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        workflow.begin_analysis().unwrap();
        workflow.complete_analysis(flagged()).unwrap();

        workflow.select_file(&png("b.png")).unwrap();
        assert!(workflow.result().is_none());
        assert_eq!(workflow.phase().name(), "image-loaded");
        assert_eq!(workflow.upload().unwrap().file_name, "b.png");
    }

    #[test]
    fn test_same_file_can_be_selected_again() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        workflow.select_file(&png("a.png")).unwrap();
        assert!(workflow.can_analyze());
    }

    #[test]
    fn test_rejected_file_keeps_state() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        let before = workflow.clone();

        let err = workflow
            .select_file(&SelectedFile::new("a.gif", "image/gif", vec![1, 2, 3]))
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::UnsupportedType { .. })
        ));
        assert_eq!(workflow, before);
    }

    #[test]
    fn test_analyze_without_image_is_validation_error() {
        let mut workflow = Workflow::default();
        assert_eq!(
            workflow.begin_analysis().unwrap_err(),
            WorkflowError::Validation(ValidationError::MissingImage)
        );
        assert_eq!(workflow.phase(), &Phase::Idle);
    }

    #[test]
    fn test_inputs_locked_while_analyzing() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        workflow.begin_analysis().unwrap();

        assert_eq!(workflow.begin_analysis().unwrap_err(), WorkflowError::Busy);
        assert_eq!(workflow.select_file(&png("b.png")).unwrap_err(), WorkflowError::Busy);
        assert_eq!(workflow.clear().unwrap_err(), WorkflowError::Busy);
        assert_eq!(
            workflow.set_method(DetectionMethod::Basic).unwrap_err(),
            WorkflowError::Busy
        );
        assert!(workflow.is_analyzing());
    }

    #[test]
    fn test_reanalysis_clears_result_before_dispatch() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        workflow.begin_analysis().unwrap();
        workflow.complete_analysis(flagged()).unwrap();

        workflow.begin_analysis().unwrap();
        assert!(workflow.result().is_none());
        assert!(workflow.is_analyzing());
    }

    #[test]
    fn test_broken_preview_resolves_without_dispatch() {
        let mut workflow = Workflow::default();
        workflow.phase = Phase::ImageLoaded(UploadState::new("a.png", "garbage"));

        let prepared = workflow.begin_analysis().unwrap();
        assert_eq!(
            prepared,
            Prepared::Aborted(AnalysisResult::failure("internal encoding error"))
        );
        assert_eq!(
            workflow.result(),
            Some(&AnalysisResult::failure("internal encoding error"))
        );
    }

    #[test]
    fn test_complete_requires_analyzing() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        assert_eq!(
            workflow.complete_analysis(flagged()).unwrap_err(),
            WorkflowError::NotAnalyzing
        );
        assert!(workflow.can_analyze());
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut workflow = Workflow::default();
        workflow.select_file(&png("a.png")).unwrap();
        workflow.clear().unwrap();
        assert_eq!(workflow.phase(), &Phase::Idle);
    }

    #[test]
    fn test_method_is_forwarded() {
        let mut workflow = Workflow::new(IntakeLimits::default(), DetectionMethod::Advanced);
        workflow.set_method(DetectionMethod::Basic).unwrap();
        workflow.select_file(&png("a.png")).unwrap();
        match workflow.begin_analysis().unwrap() {
            Prepared::Ready(request) => assert_eq!(request.method, DetectionMethod::Basic),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
