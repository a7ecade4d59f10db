use bcrypt::Version;
use chorebook_core::db::open_db_in_memory;
use chorebook_core::{
    PinError, PinService, ServiceError, ServiceErrorKind, SettingsRepository,
    SqliteSettingsRepository,
};

#[test]
fn verify_without_pin_reports_not_set() {
    let conn = open_db_in_memory().unwrap();
    let service = PinService::new(SqliteSettingsRepository::new(&conn));

    assert!(!service.pin_exists().unwrap());
    let err = service.verify_pin("1234").unwrap_err();
    assert!(matches!(err, ServiceError::Pin(PinError::NotSet)));
    assert_eq!(err.kind(), ServiceErrorKind::Validation);
    assert_eq!(err.to_string(), "No PIN set");
}

#[test]
fn set_then_verify_pin() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);
    let service = PinService::new(repo);

    service.set_pin("2468", None).unwrap();
    assert!(service.pin_exists().unwrap());
    assert!(service.verify_pin("2468").unwrap());
    assert!(!service.verify_pin("1357").unwrap());

    let stored = repo.get_setting("pin_hash").unwrap().unwrap();
    assert!(stored.starts_with("$2b$"));
    assert!(!stored.contains("2468"));
}

#[test]
fn short_pin_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = PinService::new(SqliteSettingsRepository::new(&conn));

    let err = service.set_pin("123", None).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::Validation);
    assert_eq!(err.to_string(), "PIN must be at least 4 digits");
    assert!(!service.pin_exists().unwrap());
}

#[test]
fn changing_pin_requires_matching_current_pin() {
    let conn = open_db_in_memory().unwrap();
    let service = PinService::new(SqliteSettingsRepository::new(&conn));
    service.set_pin("2468", None).unwrap();

    let err = service.set_pin("9999", None).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::Unauthorized);
    assert_eq!(err.to_string(), "Current PIN required");

    let err = service.set_pin("9999", Some("")).unwrap_err();
    assert!(matches!(err, ServiceError::Pin(PinError::CurrentRequired)));

    let err = service.set_pin("9999", Some("0000")).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::Unauthorized);
    assert_eq!(err.to_string(), "Invalid current PIN");

    service.set_pin("9999", Some("2468")).unwrap();
    assert!(service.verify_pin("9999").unwrap());
    assert!(!service.verify_pin("2468").unwrap());
}

#[test]
fn existing_bcrypt_pin_hash_is_honoured() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);
    let legacy = bcrypt::hash_with_result("1357", 4)
        .unwrap()
        .format_for_version(Version::TwoB);
    repo.put_setting("pin_hash", &legacy).unwrap();

    let service = PinService::new(repo);
    assert!(service.pin_exists().unwrap());
    assert!(service.verify_pin("1357").unwrap());
    assert!(!service.verify_pin("7531").unwrap());

    service.set_pin("8642", Some("1357")).unwrap();
    assert!(service.verify_pin("8642").unwrap());
}

#[test]
fn unreadable_pin_hash_rejects_every_pin() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);
    repo.put_setting("pin_hash", "not-a-bcrypt-hash").unwrap();

    let service = PinService::new(repo);
    assert!(!service.verify_pin("1234").unwrap());
    let err = service.set_pin("5678", Some("1234")).unwrap_err();
    assert!(matches!(err, ServiceError::Pin(PinError::CurrentMismatch)));
}
