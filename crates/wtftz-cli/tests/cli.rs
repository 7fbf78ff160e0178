use assert_cmd::Command;
use predicates::prelude::*;

fn wtftz() -> Command {
    Command::cargo_bin("wtftz").unwrap()
}

#[test]
fn converts_free_text_query() {
    wtftz()
        .arg("2012-12-23T14:23:03 from utc to est")
        .assert()
        .success()
        .stdout(predicate::str::contains("2012-12-23T09:23:03"));
}

#[test]
fn words_form_a_single_query() {
    wtftz()
        .args(["2012-12-23T14:23:03", "from", "utc", "to", "est"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:23:03"));
}

#[test]
fn explicit_flags_override_query_zones() {
    wtftz()
        .args(["2012-12-23T14:23:03", "--from", "utc", "--to", "est"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:23:03"));
}

#[test]
fn zoned_output_keeps_offset() {
    wtftz()
        .args(["2012-12-23T14:23:03 from utc to est", "--zoned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2012-12-23T09:23:03-05:00"));
}

#[test]
fn json_output_is_a_string() {
    wtftz()
        .args(["2012-12-23T14:23:03 from utc to est", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2012-12-23T09:23:03\""));
}

#[test]
fn unknown_zone_falls_back_to_utc() {
    wtftz()
        .arg("2012-12-23T14:23:03 from utc to notazone")
        .assert()
        .success()
        .stdout(predicate::str::contains("2012-12-23T14:23:03"));
}

#[test]
fn strict_mode_fails_on_unknown_zone() {
    wtftz()
        .args(["2012-12-23T14:23:03 from utc to notazone", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}

#[test]
fn unparseable_timestamp_fails() {
    wtftz()
        .arg("certainly not a timestamp!! to est")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse timestamp"));
}
