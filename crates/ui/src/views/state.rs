use dioxus::prelude::*;
use services::LessonServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    Locked { percentage: u8 },
    SaveFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            ViewError::Unknown => "Algo deu errado. Tente novamente.".to_string(),
            ViewError::NotFound => "Aula não encontrada.".to_string(),
            ViewError::Locked { percentage } => {
                format!("Aula bloqueada. Avance no curso para liberar este conteúdo ({percentage}% concluído).")
            }
            ViewError::SaveFailed => {
                "Não foi possível salvar seu progresso. Tente novamente.".to_string()
            }
        }
    }
}

impl From<&LessonServiceError> for ViewError {
    fn from(err: &LessonServiceError) -> Self {
        match err {
            LessonServiceError::NotFound(_) => ViewError::NotFound,
            LessonServiceError::Locked { percentage } => ViewError::Locked {
                percentage: *percentage,
            },
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
