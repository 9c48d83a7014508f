pub mod application {
    pub mod accounts {
        pub mod get;
    }
    pub mod auth {
        pub mod change_password;
        pub mod credentials;
        pub mod login;
        pub mod logout;
        pub mod refresh;
        pub mod register;
        pub mod token_utils;
    }
}

pub mod domain {
    pub mod accounts;
    pub mod auth;
    pub mod password;
}

pub mod infrastructure {
    pub mod auth;
    pub mod config;
    pub mod db;
    pub mod password;
    pub mod repositories {
        pub mod accounts;
        pub mod memory;
    }
    pub mod state;
}

pub mod presentation {
    pub mod cookies;
    pub mod dtos;
    pub mod extractors;
    pub mod handlers {
        pub mod accounts;
        pub mod auth;
        pub mod health;
    }
    pub mod middleware {
        pub mod cors;
        pub mod rate_limit;
    }
    pub mod openapi;
    pub mod router;
}

pub mod shared {
    pub mod error;
    pub mod response;
    pub mod validation;
}
