// The `unused_crate_dependencies` lint checks every crate in a package separately.
// See <https://github.com/rust-lang/rust/issues/57274>.
#![allow(unused_crate_dependencies)]

use features::{log, Feature};
use log::Level;

#[test]
fn both_syntaxes_produce_correct_output() {
    testing_logger::setup();

    showcase();

    testing_logger::validate(|logs| {
        itertools::assert_equal(
            logs.iter().map(|log| log.body.as_str()),
            core::iter::repeat([
                "[LogHttpRequests] GET /eth/v3/validator/blocks/1",
                "[LogHttpRequests] GET /eth/v3/validator/blocks/4",
            ])
            .take(3)
            .flatten(),
        );

        for log in logs {
            assert_eq!(log.level, Level::Info);
            assert_eq!(log.target, "features");
        }
    });
}

#[test]
fn disabled_feature_logs_nothing() {
    testing_logger::setup();

    log!(LogHttpBodies, "request body: {}", "{}");

    testing_logger::validate(|logs| assert!(logs.is_empty()));
}

fn showcase() {
    Feature::LogHttpRequests.enable();

    if Feature::LogHttpRequests.is_enabled() {
        Feature::LogHttpRequests.log("GET /eth/v3/validator/blocks/1");
    }
    if Feature::LogHttpRequests.is_enabled() {
        Feature::LogHttpRequests.log(format_args!("GET /eth/v3/validator/blocks/{}", 2 + 2));
    }

    // This is a shorthand for the above.
    // The expressions used in the message are only evaluated if the feature is enabled.
    log!(LogHttpRequests, "GET /eth/v3/validator/blocks/1");
    log!(LogHttpRequests, "GET /eth/v3/validator/blocks/{}", 2 + 2);

    // Using the full path may help avoid namespace clashes with `log::log!`.
    features::log!(LogHttpRequests, "GET /eth/v3/validator/blocks/1");
    features::log!(LogHttpRequests, "GET /eth/v3/validator/blocks/{}", 2 + 2);
}
