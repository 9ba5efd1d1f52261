use std::path::PathBuf;

pub enum Command {
    // Dataset inspection
    Datasets,
    Query {
        dataset: String,
        search: Option<String>,
        filters: Vec<(String, String)>,
        from: Option<String>,
        to: Option<String>,
        sort: Option<String>,
        page: usize,
        size: usize,
    },
    Count {
        dataset: String,
        search: Option<String>,
        filters: Vec<(String, String)>,
        from: Option<String>,
        to: Option<String>,
    },
    // Local export of the filtered view
    Export {
        dataset: String,
        file: PathBuf,
        format: Option<String>,
        search: Option<String>,
        filters: Vec<(String, String)>,
        from: Option<String>,
        to: Option<String>,
        sort: Option<String>,
    },
    // Session admin
    SessionSet {
        token: String,
        username: String,
        roles: String,
        file: Option<PathBuf>,
    },
    SessionShow,
    SessionClear {
        file: Option<PathBuf>,
    },
    GuardCheck {
        role: Option<String>,
    },
}
