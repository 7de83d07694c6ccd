///
/// Connection options.
///
/// `mysql.connect` accepts either positional arguments or one options table:
///
/// ```lua
/// local conn = mysql.connect("db.internal", "app", "secret", "shop", 3307)
/// local conn = mysql.connect { host = "db.internal", user = "app", database = "shop" }
/// ```
///
/// Missing values fall back to `localhost`, `root`, an empty password, no
/// default database, and port 3306.
///

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PORT: u16 = 3306;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectOptions {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            user: default_user(),
            password: String::new(),
            database: String::new(),
            port: default_port(),
        }
    }
}

impl ConnectOptions {
    /// Build from the positional `connect` arguments; `None` keeps the default
    pub fn from_positional(
        host: Option<String>,
        user: Option<String>,
        password: Option<String>,
        database: Option<String>,
        port: Option<u16>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            host: host.unwrap_or(defaults.host),
            user: user.unwrap_or(defaults.user),
            password: password.unwrap_or(defaults.password),
            database: database.unwrap_or(defaults.database),
            port: port.unwrap_or(defaults.port),
        }
    }

    /// Default schema, if one was requested
    pub fn database(&self) -> Option<&str> {
        if self.database.is_empty() {
            None
        } else {
            Some(&self.database)
        }
    }
}

// Hand-written so the password never reaches logs.
impl std::fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}
