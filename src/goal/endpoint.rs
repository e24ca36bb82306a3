//! The goal widget and the endpoints that set and clear the goal.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints::{self, with_query},
    format::{format_currency, format_percent},
    goal::{CommissionGoal, GoalTracker, get_progress},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    period::{Period, PeriodQuery},
    sale::{SaleRepository, total_commission},
    timezone::local_today,
};

/// The state needed to set or clear the goal.
#[derive(Debug, Clone)]
pub struct GoalState {
    pub local_timezone: String,
    pub sales: SaleRepository,
    pub goal_tracker: GoalTracker,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
            goal_tracker: state.goal_tracker.clone(),
        }
    }
}

/// The form data for setting the goal.
#[derive(Debug, Deserialize)]
pub struct GoalForm {
    /// The goal as typed, either decimal separator is accepted.
    pub goal: String,
}

/// Set the goal and re-render the goal widget for the period in the query string.
pub async fn set_goal_endpoint(
    State(state): State<GoalState>,
    Query(query): Query<PeriodQuery>,
    Form(form): Form<GoalForm>,
) -> Response {
    let value = match form.goal.parse::<CommissionGoal>() {
        Ok(goal) => goal.value(),
        Err(error) => {
            tracing::debug!("rejected commission goal {:?}", form.goal);
            return error.into_alert_response();
        }
    };

    let goal = match state.goal_tracker.set_goal(value) {
        Ok(goal) => goal,
        Err(error) => return error.into_alert_response(),
    };

    let notice = Alert::Success {
        message: "Meta Definida!".to_owned(),
        details: format!(
            "Sua nova meta de comissão é de {}.",
            format_currency(goal.value())
        ),
    };

    render_widget(&state, query, Some(notice))
}

/// Remove the goal and re-render the goal widget.
pub async fn clear_goal_endpoint(
    State(state): State<GoalState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    if let Err(error) = state.goal_tracker.clear_goal() {
        return error.into_alert_response();
    }

    let notice = Alert::SuccessSimple {
        message: "Meta removida.".to_owned(),
    };

    render_widget(&state, query, Some(notice))
}

fn render_widget(state: &GoalState, query: PeriodQuery, notice: Option<Alert>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let period = Period::resolve(query, today);
    let current_total = total_commission(&period.sales(&state.sales));

    goal_widget(state.goal_tracker.goal(), current_total, &period, notice).into_response()
}

/// The goal form, the progress towards the goal and the motivational alert card.
///
/// Progress and alert generation are disabled while no goal is set.
pub fn goal_widget(
    goal: Option<CommissionGoal>,
    current_total: f64,
    period: &Period,
    notice: Option<Alert>,
) -> Markup {
    let query = period.query_string();
    let goal_endpoint = with_query(endpoints::GOAL, &query);
    let alert_endpoint = with_query(endpoints::GOAL_ALERT, &query);
    let goal_value = goal.map(|goal| format!("{:.2}", goal.value()));

    html! {
        div id="goal-widget" class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Gerenciador de Metas" }

            @if let Some(notice) = notice {
                (notice.into_html())
            }

            form
                hx-post=(goal_endpoint)
                hx-target="#goal-widget"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="goal" class=(FORM_LABEL_STYLE)
                    {
                        "Meta de Comissão Mensal (R$)"
                    }

                    div class="input-wrapper"
                    {
                        input
                            id="goal"
                            type="number"
                            name="goal"
                            step="0.01"
                            min="0.01"
                            placeholder="5000,00"
                            value=[goal_value]
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Definir Meta" }
            }

            @if let Some(goal) = goal {
                @let progress = get_progress(current_total, goal.value());

                div class="mt-6"
                {
                    div class="flex justify-between text-sm mb-1"
                    {
                        span { "Progresso Atual" }
                        span
                        {
                            (format_currency(current_total)) " / " (format_currency(goal.value()))
                        }
                    }

                    div
                        role="progressbar"
                        aria-valuemin="0"
                        aria-valuemax="100"
                        aria-valuenow=(format!("{progress:.1}"))
                        class="w-full h-3 bg-gray-200 rounded-full dark:bg-gray-700"
                    {
                        div
                            class="h-3 bg-blue-600 rounded-full"
                            style=(format!("width: {progress:.1}%"))
                        {}
                    }

                    p class="mt-1 text-sm text-right" { (format_percent(progress)) }
                }

                button
                    type="button"
                    hx-delete=(goal_endpoint)
                    hx-target="#goal-widget"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Remover Meta"
                }
            } @else {
                p class="mt-4 text-sm text-gray-500 dark:text-gray-400"
                {
                    (Error::NoGoalSet.to_string())
                }
            }

            div class="mt-6 border-t pt-4 border-gray-200 dark:border-gray-700"
            {
                h3 class="text-lg font-semibold mb-2" { "Mensagem da IA" }

                button
                    type="button"
                    id="generate-alert"
                    hx-post=(alert_endpoint)
                    hx-target="#motivational-alert"
                    hx-target-error="#motivational-alert"
                    hx-indicator="#generate-alert"
                    disabled[goal.is_none()]
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { "Gerando... " }
                    "Gerar Alerta Motivacional IA"
                }

                div id="motivational-alert" class="mt-4" {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use time::Month;

    use crate::{
        AppState,
        goal::{CommissionGoal, clear_goal_endpoint, goal_widget, set_goal_endpoint},
        period::{Period, PeriodQuery},
        sale::ProductFilter,
        test_utils::{
            assert_form_input, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            get_test_app_state, must_get_form, parse_html_fragment,
        },
    };

    use super::{GoalForm, GoalState};

    fn goal_state(state: &AppState) -> GoalState {
        GoalState {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
            goal_tracker: state.goal_tracker.clone(),
        }
    }

    fn march_2025() -> Period {
        Period {
            year: 2025,
            month: Month::March,
            filter: ProductFilter::All,
        }
    }

    #[test]
    fn widget_without_goal_disables_alerts() {
        let html = scraper::Html::parse_fragment(
            &goal_widget(None, 0.0, &march_2025(), None).into_string(),
        );
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/goal?year=2025&month=2&product=all", "hx-post");
        assert_form_input(&form, "goal", "number");

        let button = html
            .select(&Selector::parse("#generate-alert").unwrap())
            .next()
            .expect("alert button missing");
        assert!(button.value().attr("disabled").is_some());
        assert!(
            html.select(&Selector::parse("[role=progressbar]").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn widget_with_goal_shows_progress() {
        let goal = CommissionGoal::new(5000.0).unwrap();
        let html = scraper::Html::parse_fragment(
            &goal_widget(Some(goal), 2500.0, &march_2025(), None).into_string(),
        );

        let progress_bar = html
            .select(&Selector::parse("[role=progressbar]").unwrap())
            .next()
            .expect("progress bar missing");
        assert_eq!(progress_bar.value().attr("aria-valuenow"), Some("50.0"));

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("R$ 2.500,00 / R$ 5.000,00"), "got {text}");

        let button = html
            .select(&Selector::parse("#generate-alert").unwrap())
            .next()
            .unwrap();
        assert!(button.value().attr("disabled").is_none());
    }

    #[tokio::test]
    async fn set_goal_saves_and_renders_widget() {
        let state = get_test_app_state();

        let response = set_goal_endpoint(
            State(goal_state(&state)),
            Query(PeriodQuery::default()),
            Form(GoalForm {
                goal: "5000,50".to_owned(),
            }),
        )
        .await;

        assert_status_ok(&response);
        assert_eq!(state.goal_tracker.goal().map(|goal| goal.value()), Some(5000.5));
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Meta Definida!"));
        assert!(text.contains("Sua nova meta de comissão é de R$ 5.000,50."));
    }

    #[tokio::test]
    async fn set_goal_rejects_invalid_value() {
        let state = get_test_app_state();

        for goal in ["0", "-10", "abc", ""] {
            let response = set_goal_endpoint(
                State(goal_state(&state)),
                Query(PeriodQuery::default()),
                Form(GoalForm {
                    goal: goal.to_owned(),
                }),
            )
            .await;

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let html = parse_html_fragment(response).await;
            assert!(html.html().contains("Por favor, insira um valor de meta válido."));
        }

        assert_eq!(state.goal_tracker.goal(), None);
    }

    #[tokio::test]
    async fn clear_goal_removes_goal() {
        let state = get_test_app_state();
        state.goal_tracker.set_goal(1000.0).unwrap();

        let response = clear_goal_endpoint(
            State(goal_state(&state)),
            Query(PeriodQuery {
                year: Some(2025),
                month: Some(2),
                product: ProductFilter::All,
            }),
        )
        .await;

        assert_status_ok(&response);
        assert_eq!(state.goal_tracker.goal(), None);
    }
}
