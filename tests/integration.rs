// Integration tests module

mod integration {
    mod client_test;
    mod config_test;
    mod scheduler_test;
    mod web_test;
}
