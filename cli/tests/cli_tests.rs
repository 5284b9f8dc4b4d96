#[test]
fn show() {
    trycmd::TestCases::new()
        .case("tests/show/*.toml")
        .default_bin_name("dope");
}
