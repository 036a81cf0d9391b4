use std::io::Write;

use anyhow::Context;
use clap::Parser;
use vaccine_core::{AvailabilityReport, HttpTransport, Session, SessionConfig, UsState};

/// Find COVID-19 vaccine availabilities in a particular state.
#[derive(Debug, Parser)]
#[command(
    name = "cvs-vaccine",
    about = "Find COVID-19 vaccine availabilities in a particular state"
)]
pub struct Cli {
    /// Two-letter US state code; e.g. MA, NH, WA...
    pub state: UsState,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut session = Session::new(SessionConfig::default())
            .context("Failed to set up HTTP session")?;

        let stdout = std::io::stdout();
        self.check(&mut session, &mut stdout.lock()).await?;

        Ok(())
    }

    /// Fetch the state's pharmacies through `session` and write the report to `out`.
    pub async fn check<T: HttpTransport>(
        &self,
        session: &mut Session<T>,
        out: &mut impl Write,
    ) -> anyhow::Result<AvailabilityReport> {
        let state = self.state;

        let response = session
            .get_info(state)
            .await
            .with_context(|| format!("Failed to fetch vaccine status for {}", state.title_name()))?;

        let info = response.payload()?;
        tracing::debug!(
            current_time = %info.current_time,
            is_booking_completed = info.is_booking_completed,
            "received vaccine status"
        );

        let report = AvailabilityReport::from_info(info, state);
        for line in report.lines() {
            writeln!(out, "{line}")?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::{CommandFactory, error::ErrorKind};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use vaccine_core::HttpResponse;

    /// Answers the warm-up with an empty page and every other request with `body`.
    #[derive(Debug)]
    struct StubTransport {
        body: String,
        calls: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn new(body: Value) -> Self {
            Self { body: body.to_string(), calls: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn get(
            &self,
            url: &str,
            _referer: Option<&str>,
        ) -> vaccine_core::error::Result<HttpResponse> {
            let mut calls = self.calls.lock().unwrap();
            let body = if calls.is_empty() { String::new() } else { self.body.clone() };
            calls.push(url.to_string());
            Ok(HttpResponse { status: 200, body })
        }
    }

    fn payload(pharmacies: Value) -> Value {
        json!({
            "responsePayloadData": {
                "currentTime": "2021-03-01T10:15:00.000",
                "isBookingCompleted": false,
                "data": { "MA": pharmacies },
            },
            "responseMetaData": { "statusDesc": "Success" },
        })
    }

    fn session(body: Value) -> Session<StubTransport> {
        Session::with_transport(
            SessionConfig::with_base_url("https://cvs.test/vaccine"),
            StubTransport::new(body),
        )
    }

    #[test]
    fn parses_state_argument() {
        let cli = Cli::try_parse_from(["cvs-vaccine", "MA"]).expect("MA is valid");
        assert_eq!(cli.state, UsState::Massachusetts);
    }

    #[test]
    fn rejects_unknown_or_lowercase_state() {
        for code in ["ZZ", "ma", "Massachusetts"] {
            let err = Cli::try_parse_from(["cvs-vaccine", code]).unwrap_err();
            assert!(err.to_string().contains("Unknown state code"), "{code}: {err}");
        }
    }

    #[test]
    fn only_help_flag_is_accepted() {
        for flag in ["--version", "-V", "--verbose"] {
            let err = Cli::try_parse_from(["cvs-vaccine", flag, "MA"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownArgument, "{flag}");
        }

        let err = Cli::try_parse_from(["cvs-vaccine", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Cli::try_parse_from(["cvs-vaccine", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn help_describes_the_lookup() {
        let help = Cli::command().render_help().to_string();
        assert!(help.starts_with("Find COVID-19 vaccine availabilities in a particular state"));
        assert!(help.contains("Two-letter US state code; e.g. MA, NH, WA..."));
        assert!(!help.contains("--version"));
    }

    #[test]
    fn requires_exactly_one_state() {
        assert!(Cli::try_parse_from(["cvs-vaccine"]).is_err());
        assert!(Cli::try_parse_from(["cvs-vaccine", "MA", "NH"]).is_err());
    }

    #[tokio::test]
    async fn prints_available_cities() {
        let mut session = session(payload(json!([
            { "city": "Boston", "state": "MA", "status": "Available" },
            { "city": "Worcester", "state": "MA", "status": "Fully Booked" },
        ])));
        let cli = Cli { state: UsState::Massachusetts };

        let mut out = Vec::new();
        cli.check(&mut session, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Available: Boston\n");
        assert_eq!(session.config().base_url, "https://cvs.test/vaccine");
    }

    #[tokio::test]
    async fn prints_summary_when_fully_booked() {
        let mut session = session(payload(json!([
            { "city": "Boston", "state": "MA", "status": "Fully Booked" },
            { "city": "Worcester", "state": "MA", "status": "Fully Booked" },
            { "city": "Lowell", "state": "MA", "status": "Fully Booked" },
        ])));
        let cli = Cli { state: UsState::Massachusetts };

        let mut out = Vec::new();
        cli.check(&mut session, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No availabilities found; checked 3 CVS locations in Massachusetts\n"
        );
    }

    #[tokio::test]
    async fn unknown_status_prints_nothing() {
        let mut session = session(payload(json!([
            { "city": "Boston", "state": "MA", "status": "Unknown" },
        ])));
        let cli = Cli { state: UsState::Massachusetts };

        let mut out = Vec::new();
        let err = cli.check(&mut session, &mut out).await.unwrap_err();

        assert!(out.is_empty());
        let cause = err.downcast_ref::<vaccine_core::VaccineError>().expect("core error");
        assert!(cause.is_malformed());
        assert!(format!("{err:#}").contains("Failed to fetch vaccine status for Massachusetts"));
    }
}
