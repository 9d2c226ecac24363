//! Full question → answer flows through `Advisor`.

use weather_advisor::advisor::{Advisor, NEED_LOCATION};
use weather_advisor::intent::IntentParser;

use crate::mock_provider::{DaySpec, MockForecast};

const MILD: DaySpec = DaySpec::new(21, 10, 12, 50);
const WET: DaySpec = DaySpec::new(15, 80, 20, 75);
const COLD: DaySpec = DaySpec::new(8, 5, 10, 60);
const GUSTY: DaySpec = DaySpec::new(18, 15, 65, 55);

fn perth_week() -> Vec<DaySpec> {
    vec![MILD, WET, COLD, GUSTY, MILD]
}

fn advisor_with(provider: MockForecast) -> Advisor {
    Advisor::new(IntentParser::rule_based(), Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Happy paths -----------------------------------------------------

    #[tokio::test]
    async fn test_umbrella_tomorrow() {
        let provider = MockForecast::new().with_location("Perth", &perth_week());
        let requests = provider.requests();
        let advisor = advisor_with(provider);

        let answer = advisor.ask("Do I need an umbrella tomorrow in Perth?", None).await;
        let lines: Vec<&str> = answer.lines().collect();

        assert_eq!(lines[0], "Yes, bring an umbrella: up to 80% chance of rain in Perth tomorrow.");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Forecast for Perth — Tomorrow:");
        assert_eq!(
            lines[3],
            "• 2026-10-15: ~15°C (min 11°C / max 19°C), rain up to 80%, Partly cloudy"
        );
        assert_eq!(requests.lock().unwrap()[0], ("Perth".to_string(), 2));
    }

    #[tokio::test]
    async fn test_next_four_days_lists_four_bullets() {
        let advisor = advisor_with(MockForecast::new().with_location("Melbourne", &perth_week()));

        let answer = advisor.ask("What about next 4 days in Melbourne", None).await;

        assert!(answer.starts_with("In Melbourne today, expect about 21°C (min 17°C / max 25°C)"));
        assert!(answer.contains("Forecast for Melbourne — next 4 days:"));
        assert_eq!(answer.matches("• ").count(), 4);
    }

    #[tokio::test]
    async fn test_weekend_wind_question() {
        let advisor = advisor_with(MockForecast::new().with_location("Wellington", &[GUSTY, MILD, MILD]));

        let answer = advisor.ask("Is it going to be windy in Wellington this weekend?", None).await;

        assert!(answer.starts_with("Yes, it'll be very windy in Wellington today (gusts up to ~65 km/h)."));
        assert!(answer.contains("next 3 days"));
    }

    #[tokio::test]
    async fn test_feel_cold_with_default_location() {
        let provider = MockForecast::new().with_location("Hobart", &[COLD, MILD, MILD]);
        let requests = provider.requests();
        let advisor = advisor_with(provider);

        let answer = advisor.ask("Will it feel cold today?", Some("Hobart")).await;

        assert!(answer.starts_with("Yes, it'll feel cold in Hobart today (around 8°C)"));
        assert_eq!(requests.lock().unwrap()[0].0, "Hobart");
    }

    #[tokio::test]
    async fn test_outdoor_plans_get_verdict() {
        let advisor = advisor_with(MockForecast::new().with_location("Sydney", &[MILD, WET]));

        let picnic = advisor.ask("Thinking of a picnic in Sydney", None).await;
        assert!(picnic.starts_with("Yes, pleasant in Sydney today"));

        let rainy = advisor.ask("Good day to hike in Sydney tomorrow", None).await;
        assert!(rainy.starts_with("No, not ideal in Sydney tomorrow: up to 80% chance of rain."));
    }

    #[tokio::test]
    async fn test_forecast_listing() {
        let advisor = advisor_with(MockForecast::new().with_location("Perth", &perth_week()));

        let listing = advisor.forecast_listing("perth", 2).await;

        assert!(listing.starts_with("Current weather in Perth: 21°C, Partly cloudy\n\nForecast:\n"));
        assert_eq!(listing.lines().filter(|l| l.starts_with("  2026-")).count(), 2);
    }

    // -- Degraded paths --------------------------------------------------

    #[tokio::test]
    async fn test_no_location_anywhere() {
        let provider = MockForecast::new();
        let requests = provider.requests();
        let advisor = advisor_with(provider);

        assert_eq!(advisor.ask("Will it rain tomorrow?", None).await, NEED_LOCATION);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_down_gives_apology() {
        let provider = MockForecast::new().with_location("Perth", &perth_week());
        provider.set_error();
        let advisor = advisor_with(provider);

        assert_eq!(
            advisor.ask("Will it rain in Perth?", None).await,
            "Sorry, I couldn't retrieve weather data right now."
        );
        assert_eq!(
            advisor.forecast_listing("Perth", 3).await,
            "Sorry, I couldn't retrieve weather data right now."
        );
    }

    #[tokio::test]
    async fn test_tomorrow_with_single_day_forecast() {
        let advisor = advisor_with(MockForecast::new().with_location("Perth", &[MILD]));

        let answer = advisor.ask("Will it rain tomorrow in Perth?", None).await;

        assert_eq!(answer, "Sorry, I couldn't find a forecast for Perth.");
    }
}
