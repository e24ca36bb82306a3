use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    goal::GoalTracker,
    motivation::{AlertGenerator, MotivationalAlertInput, MotivationalAlertOutput, NEUTRAL_MESSAGE},
    period::{Period, PeriodQuery},
    sale::{SaleRepository, total_commission},
    timezone::local_today,
};

/// The state needed to generate a motivational alert.
#[derive(Debug, Clone)]
pub struct AlertState {
    pub local_timezone: String,
    pub sales: SaleRepository,
    pub goal_tracker: GoalTracker,
    pub alert_generator: Arc<dyn AlertGenerator>,
    pub representative_name: String,
}

impl FromRef<AppState> for AlertState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
            goal_tracker: state.goal_tracker.clone(),
            alert_generator: state.alert_generator.clone(),
            representative_name: state.representative_name.clone(),
        }
    }
}

/// Generate a motivational alert for the commission total of the displayed period.
///
/// Nothing is sent to the generator while no goal is set.
pub async fn generate_alert_endpoint(
    State(state): State<AlertState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let Some(goal) = state.goal_tracker.goal() else {
        return Error::NoGoalSet.into_alert_response();
    };

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let period = Period::resolve(query, today);
    let input = MotivationalAlertInput {
        sales_representative_name: state.representative_name.clone(),
        current_commission: total_commission(&period.sales(&state.sales)),
        target_commission: goal.value(),
    };

    match state.alert_generator.generate(&input).await {
        Ok(output) => alert_card(&output).into_response(),
        Err(error) => {
            tracing::error!("could not generate motivational alert: {error}");
            error.into_alert_response()
        }
    }
}

/// The generated message, or the neutral message if the generator marked it as not relevant.
pub fn alert_card(output: &MotivationalAlertOutput) -> Markup {
    let (style, message) = if output.is_relevant {
        (
            "p-4 text-sm rounded-lg text-blue-800 bg-blue-50 dark:bg-gray-800 dark:text-blue-300",
            output.alert_message.as_str(),
        )
    } else {
        (
            "p-4 text-sm rounded-lg text-gray-700 bg-gray-100 dark:bg-gray-800 dark:text-gray-300",
            NEUTRAL_MESSAGE,
        )
    };

    html! {
        div class=(style) role="status"
        {
            p { (message) }
        }
    }
}
