//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, motivation::GENERATION_FAILED_MESSAGE,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client name on a sale was shorter than two characters once trimmed.
    #[error("O nome do cliente deve ter pelo menos 2 caracteres.")]
    ClientNameTooShort,

    /// The sale value was zero, negative or not a finite number.
    #[error("O valor da venda deve ser positivo.")]
    NonPositiveSaleValue,

    /// The commission rate was outside of the range 0 to 100 percent.
    #[error("A taxa de comissão deve ser entre 0 e 100.")]
    CommissionRateOutOfRange,

    /// The product type did not match one of the known product types.
    ///
    /// Holds the offending text so that it can be logged.
    #[error("Selecione um tipo de produto.")]
    UnknownProductType(String),

    /// A date string could not be parsed as an ISO 8601 calendar date.
    #[error("could not parse \"{0}\" as a date")]
    InvalidDate(String),

    /// A zero-based month index greater than 11 was used in a query.
    #[error("{0} is not a valid month index, expected a number from 0 to 11")]
    InvalidMonth(u8),

    /// The commission goal was not a finite, positive number.
    #[error("Por favor, insira um valor de meta válido.")]
    InvalidGoal,

    /// An alert was requested before a commission goal was set.
    #[error("Defina uma meta de comissão antes de gerar um alerta.")]
    NoGoalSet,

    /// The motivational text generator failed.
    ///
    /// The string holds the underlying cause and is only intended for the
    /// server logs. Users are shown [GENERATION_FAILED_MESSAGE] instead.
    #[error("could not generate motivational text: {0}")]
    GenerationFailed(String),

    /// A report was requested for a period with no records.
    #[error("Não há dados para exportar.")]
    NothingToExport,

    /// The PDF document could not be rendered.
    #[error("could not render the PDF report: {0}")]
    ReportRenderError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a sale that does not exist
    #[error("tried to update a sale that is not in the database")]
    UpdateMissingSale,

    /// Tried to delete a sale that does not exist
    #[error("tried to delete a sale that is not in the database")]
    DeleteMissingSale,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                    configurações do servidor e use um nome de fuso horário canônico."
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            error @ (Error::ClientNameTooShort
            | Error::NonPositiveSaleValue
            | Error::CommissionRateOutOfRange
            | Error::UnknownProductType(_)
            | Error::InvalidGoal) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Dados inválidos".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Data inválida".to_owned(),
                    details: format!("Não foi possível interpretar a data \"{date}\"."),
                },
            ),
            Error::NoGoalSet => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: Error::NoGoalSet.to_string(),
                },
            ),
            Error::NothingToExport => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: Error::NothingToExport.to_string(),
                },
            ),
            Error::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::ErrorSimple {
                    message: GENERATION_FAILED_MESSAGE.to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Fuso horário inválido".to_owned(),
                    details: format!(
                        "Não foi possível obter o fuso horário \"{timezone}\". Verifique as \
                        configurações do servidor e use um nome de fuso horário canônico."
                    ),
                },
            ),
            Error::UpdateMissingSale => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Não foi possível atualizar a venda".to_owned(),
                    details: "A venda não foi encontrada.".to_owned(),
                },
            ),
            Error::DeleteMissingSale => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Não foi possível excluir a venda".to_owned(),
                    details: "A venda não foi encontrada. \
                    Atualize a página para ver se ela já foi excluída."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Algo deu errado".to_owned(),
                    details: "Ocorreu um erro inesperado, verifique os logs do servidor."
                        .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
