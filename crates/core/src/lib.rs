pub mod collector;
pub mod config;
pub mod gate;
pub mod issuer;
pub mod protocol;
pub mod report;
pub mod testing;
pub mod ticket;

pub use collector::{
    save_artifact, Artifact, CollectorConfig, CollectorError, CollectorState, HttpReportApi,
    PollOutcome, PollPolicy, ReportApi, ReportCollector, Step,
};
pub use config::{
    load_apis_config, load_apis_config_from_str, load_collector_config,
    load_collector_config_from_str, validate_apis_config, validate_collector_config, ApisConfig,
    ConfigError, ServerConfig,
};
pub use gate::{GateConfig, OverloadFlag, OverloadToggler, ReadinessGate, ToggleCallback};
pub use issuer::{IssueError, Lookup, ReportIssuer};
pub use report::{
    Report, ReportConfig, ReportError, ReportGenerator, ReportRow, SyntheticReportGenerator,
};
pub use ticket::{IdentitySource, Ticket, TicketError, UuidIdentitySource, TICKET_DELIMITER};
