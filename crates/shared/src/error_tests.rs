use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Validation(String::new()), 64)]
#[case(AppError::NotFound(String::new()), 66)]
#[case(AppError::Source(String::new()), 69)]
#[case(AppError::Internal(String::new()), 70)]
#[case(AppError::Render(String::new()), 74)]
#[case(AppError::Config(String::new()), 78)]
fn test_error_exit_codes(#[case] err: AppError, #[case] expected: i32) {
    assert_eq!(err.exit_code(), expected);
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Validation(String::new()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
    assert_eq!(AppError::Source(String::new()).error_code(), "SOURCE_ERROR");
    assert_eq!(AppError::Render(String::new()).error_code(), "RENDER_ERROR");
    assert_eq!(
        AppError::Internal(String::new()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::NotFound("msg".into()).to_string(),
        "Not found: msg"
    );
    assert_eq!(
        AppError::Validation("msg".into()).to_string(),
        "Validation error: msg"
    );
    assert_eq!(
        AppError::Source("msg".into()).to_string(),
        "Source error: msg"
    );
    assert_eq!(
        AppError::Render("msg".into()).to_string(),
        "Render error: msg"
    );
}

#[test]
fn test_config_error_conversion() {
    let err: AppError = config::ConfigError::NotFound("source".into()).into();
    assert!(matches!(err, AppError::Config(_)));
    assert_eq!(err.exit_code(), 78);
}
