//! # 세션 생성 위저드
//!
//! 두 단계로 세션을 만듭니다.
//!
//! 1. `CollectingConfig`: 직무/경력/주제/질문 수를 입력받아 로컬 검증 후 질문 생성 API 호출
//! 2. `ReviewingQuestions`: 생성된 질문을 확인하고 설명(선택)을 붙여 세션 생성 API 호출
//!
//! 검토 단계에서 `back()`으로 돌아가도 입력값과 생성된 질문은 그대로 남습니다.

use thiserror::Error;

use super::api::{ClientError, SessionApi};
use crate::models::*;

#[derive(Debug, Error)]
pub enum WizardError {
    /// 로컬 검증 실패. 네트워크 호출은 일어나지 않습니다.
    #[error("{0}")]
    Validation(String),

    #[error("Action not available in the current step")]
    InvalidStep,

    #[error(transparent)]
    Api(#[from] ClientError),
}

/// 1단계 입력값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub role: String,
    pub experience: String,
    pub topics: Vec<String>,
    pub number_of_questions: i64,
}

impl SessionConfig {
    /// 서버와 같은 규칙에 클라이언트 전용 규칙(직무명 3자 이상)을 더해 검증합니다.
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.role.trim().chars().count() < MIN_ROLE_CHARS {
            return Err(WizardError::Validation(format!(
                "Role must be at least {} characters",
                MIN_ROLE_CHARS
            )));
        }
        if self.experience.trim().is_empty() {
            return Err(WizardError::Validation("Experience is required".to_string()));
        }
        if Topics::Many(self.topics.clone()).is_empty() {
            return Err(WizardError::Validation(
                "Add at least one topic to focus on".to_string(),
            ));
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.number_of_questions) {
            return Err(WizardError::Validation(format!(
                "Number of questions must be between {} and {}",
                MIN_QUESTIONS, MAX_QUESTIONS
            )));
        }
        Ok(())
    }

    fn topics(&self) -> Topics {
        let cleaned = Topics::Many(self.topics.clone()).to_list();
        Topics::from(cleaned)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    CollectingConfig,
    ReviewingQuestions { questions: Vec<QuestionPair> },
}

#[derive(Debug)]
pub struct CreateSessionWizard {
    step: WizardStep,
    config: Option<SessionConfig>,
    generated: Option<Vec<QuestionPair>>,
}

impl Default for CreateSessionWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateSessionWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::CollectingConfig,
            config: None,
            generated: None,
        }
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    /// 마지막으로 제출한 입력값 (폼 다시 채우기용)
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    /// 마지막으로 생성된 질문 목록
    pub fn generated_questions(&self) -> Option<&[QuestionPair]> {
        self.generated.as_deref()
    }

    /// 입력값을 검증하고 질문을 생성한 뒤 검토 단계로 넘어갑니다.
    ///
    /// 검증이나 API 호출이 실패하면 단계와 기존 데이터는 바뀌지 않습니다.
    pub async fn submit_config<A: SessionApi + ?Sized>(
        &mut self,
        config: SessionConfig,
        api: &A,
    ) -> Result<&[QuestionPair], WizardError> {
        if self.step != WizardStep::CollectingConfig {
            return Err(WizardError::InvalidStep);
        }
        config.validate()?;

        let req = GenerateQuestionsRequest {
            role: Some(config.role.trim().to_string()),
            experience: Some(config.experience.trim().to_string()),
            topics_to_focus: Some(config.topics()),
            number_of_questions: Some(config.number_of_questions),
        };
        let questions = api.generate_questions(&req).await?;
        tracing::debug!(count = questions.len(), "Generated questions for review");

        self.config = Some(config);
        self.generated = Some(questions.clone());
        self.step = WizardStep::ReviewingQuestions { questions };

        Ok(self.generated.as_deref().unwrap_or(&[]))
    }

    /// 검토 단계에서 입력 단계로 돌아갑니다. 데이터는 버리지 않습니다.
    pub fn back(&mut self) {
        self.step = WizardStep::CollectingConfig;
    }

    /// 다시 생성하지 않고 이전에 생성한 질문으로 검토 단계에 돌아갑니다.
    pub fn resume_review(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::CollectingConfig {
            return Err(WizardError::InvalidStep);
        }
        let questions = self.generated.clone().ok_or(WizardError::InvalidStep)?;
        self.step = WizardStep::ReviewingQuestions { questions };
        Ok(())
    }

    /// 세션을 저장하고 생성된 세션을 돌려줍니다. 호출자는 그 ID로 상세 화면에 이동합니다.
    pub async fn save<A: SessionApi + ?Sized>(
        &mut self,
        description: Option<&str>,
        api: &A,
    ) -> Result<SessionWithQuestions, WizardError> {
        let (WizardStep::ReviewingQuestions { questions }, Some(config)) = (&self.step, &self.config)
        else {
            return Err(WizardError::InvalidStep);
        };

        let description = description.map(str::trim).filter(|d| !d.is_empty());
        if let Some(d) = description {
            if d.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(WizardError::Validation(format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_CHARS
                )));
            }
        }

        let req = CreateSessionRequest {
            role: Some(config.role.trim().to_string()),
            experience: Some(config.experience.trim().to_string()),
            topics_to_focus: Some(config.topics()),
            description: description.map(str::to_string),
            questions: questions.clone(),
        };
        let session = api.create_session(&req).await?;
        tracing::info!(session_id = %session.session.id, "Session created from wizard");

        Ok(session)
    }
}
