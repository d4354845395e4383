pub mod application {
    pub mod cart {
        pub mod checkout;
        pub mod controller;
    }
    pub mod catalog {
        pub mod configure;
        pub mod get;
    }
    pub mod cart_item {
        pub mod add;
        pub mod clear;
        pub mod delete;
        pub mod get_all;
        pub mod update_quantity;
    }
    pub mod order {
        pub mod create;
        pub mod get_all;
    }
    pub mod quote {
        pub mod get_all;
        pub mod request;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod notifier;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod auth;
        pub mod checkout;
        pub mod errors;
        pub mod gateway;
        pub mod model;
        pub mod session;
        pub mod state;
        pub mod store;
    }
    pub mod catalog {
        pub mod errors;
        pub mod gateway;
        pub mod model;
        pub mod use_cases {
            pub mod configure;
            pub mod get;
        }
    }
    pub mod cart_item {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add;
            pub mod clear;
            pub mod delete;
            pub mod get_all;
            pub mod update_quantity;
        }
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod get_all;
        }
    }
    pub mod quote {
        pub mod errors;
        pub mod gateway;
        pub mod model;
        pub mod use_cases {
            pub mod get_all;
            pub mod request;
        }
    }
}
