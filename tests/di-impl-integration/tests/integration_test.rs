//! IoC 容器集成测试
use anyhow::Result;
use di_abstractions::{Arguments, ClassProvider, Injectable, ProvideOpts};
use di_impl::{container, Container};
use infrastructure_common::{ContainerConfig, DependencyError, Scope, Token};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// 测试日志组件
#[derive(Debug)]
struct Logger;

impl Logger {
    fn log(&self, msg: &str) -> String {
        format!("[LOG] {}", msg)
    }
}

impl Injectable for Logger {
    fn construct(_args: &Arguments) -> Result<Self, DependencyError> {
        Ok(Self)
    }
}

/// 依赖日志组件的测试服务
#[derive(Debug)]
struct TestService {
    logger: Arc<Logger>,
}

impl TestService {
    fn do_something(&self) -> String {
        self.logger.log("Something")
    }
}

impl Injectable for TestService {
    const ARITY: usize = 1;

    fn construct(args: &Arguments) -> Result<Self, DependencyError> {
        Ok(Self {
            logger: args.get(0)?,
        })
    }
}

/// 需要两个构造参数的服务
#[derive(Debug)]
struct Mailer {
    host: Arc<String>,
    port: Arc<u16>,
}

impl Injectable for Mailer {
    const ARITY: usize = 2;

    fn construct(args: &Arguments) -> Result<Self, DependencyError> {
        Ok(Self {
            host: args.get(0)?,
            port: args.get(1)?,
        })
    }
}

#[test]
fn test_rebinding_replaces_descriptor() -> Result<()> {
    let container = Container::new();
    container.bind("Greeting", ProvideOpts::value(String::from("old")));
    container.bind("Greeting", ProvideOpts::value(String::from("new")));

    assert_eq!(container.resolve::<String>("Greeting")?.as_str(), "new");
    assert_eq!(container.get_registry().len(), 1);
    Ok(())
}

#[test]
fn test_transient_and_singleton_scopes() -> Result<()> {
    let container = Container::new();
    container.bind("Transient", ProvideOpts::class::<Logger>());
    container
        .bind("Singleton", ProvideOpts::class::<Logger>())
        .set_scope(Scope::Singleton)?;

    let a = container.resolve::<Logger>("Transient")?;
    let b = container.resolve::<Logger>("Transient")?;
    assert!(!Arc::ptr_eq(&a, &b));

    let c = container.resolve::<Logger>("Singleton")?;
    let d = container.resolve::<Logger>("Singleton")?;
    assert!(Arc::ptr_eq(&c, &d));
    Ok(())
}

#[test]
fn test_singleton_provider_executes_once() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let container = Container::new();
    container
        .bind(
            "Id",
            ProvideOpts::function(move || counter.fetch_add(1, Ordering::SeqCst)),
        )
        .set_scope(Scope::Singleton)?;

    for _ in 0..3 {
        assert_eq!(*container.resolve::<usize>("Id")?, 0);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_unknown_token_fails() {
    let container = Container::new();

    let error = container.resolve::<String>("never-bound").unwrap_err();
    assert_eq!(
        error,
        DependencyError::NoSuchService {
            token: Token::from("never-bound"),
        }
    );
}

#[test]
fn test_missing_provider_fails() {
    let container = Container::new();
    container.bind("Logger", ProvideOpts::new());

    let error = container.resolve_instance("Logger").unwrap_err();
    assert!(matches!(error, DependencyError::NoProvider { .. }));
}

#[test]
fn test_dependency_injection() -> Result<()> {
    init_tracing();
    let container = Container::new();
    container.bind("Logger", ProvideOpts::class::<Logger>());
    container.bind(
        "TestService",
        ProvideOpts::class::<TestService>().dependencies(["Logger"]),
    );

    let service = container.resolve::<TestService>("TestService")?;
    assert_eq!(service.do_something(), "[LOG] Something");
    Ok(())
}

#[test]
fn test_missing_dependency_count_fails() {
    let container = Container::new();
    container.bind("Host", ProvideOpts::value(String::from("smtp.local")));
    container.bind(
        "Mailer",
        ProvideOpts::class::<Mailer>().dependencies(["Host"]),
    );

    let error = container.resolve::<Mailer>("Mailer").unwrap_err();
    assert_eq!(
        error,
        DependencyError::MissingDependencies {
            token: Token::from("Mailer"),
            actual: 1,
            expected: 2,
        }
    );
}

#[test]
fn test_transitive_dependencies() -> Result<()> {
    let container = Container::new();
    container.bind_many(|binder| {
        binder.bind("Host", ProvideOpts::value(String::from("smtp.local")));
        binder.bind("Port", ProvideOpts::function(|| 25u16));
        binder.bind(
            "Mailer",
            ProvideOpts::class::<Mailer>().dependencies(["Host", "Port"]),
        );
    });

    let mailer = container.resolve::<Mailer>("Mailer")?;
    assert_eq!(mailer.host.as_str(), "smtp.local");
    assert_eq!(*mailer.port, 25);
    Ok(())
}

#[test]
fn test_extra_dependencies_still_construct() -> Result<()> {
    let container = Container::new();
    container.bind("Logger", ProvideOpts::class::<Logger>());
    container.bind("Host", ProvideOpts::value(String::from("smtp.local")));
    container.bind(
        "TestService",
        ProvideOpts::class::<TestService>().dependencies(["Logger", "Host"]),
    );

    let service = container.resolve::<TestService>("TestService")?;
    assert_eq!(service.do_something(), "[LOG] Something");
    Ok(())
}

#[test]
fn test_wrong_argument_type_fails() {
    let container = Container::new();
    container.bind("Host", ProvideOpts::value(String::from("smtp.local")));
    container.bind("Port", ProvideOpts::value(25u32));
    container.bind(
        "Mailer",
        ProvideOpts::class::<Mailer>().dependencies(["Host", "Port"]),
    );

    let error = container.resolve::<Mailer>("Mailer").unwrap_err();
    assert!(matches!(
        error,
        DependencyError::ArgumentTypeMismatch { index: 1, .. }
    ));
}

#[test]
fn test_ad_hoc_class_provider() -> Result<()> {
    let container = Container::new();
    container.bind("Name", ProvideOpts::value(String::from("world")));
    container.bind(
        "Greeting",
        ProvideOpts::new()
            .use_class_provider(ClassProvider::from_fn("Greeting", 1, |args| {
                let name = args.get::<String>(0)?;
                Ok(format!("hello {}", name))
            }))
            .dependency("Name"),
    );

    assert_eq!(container.resolve::<String>("Greeting")?.as_str(), "hello world");
    Ok(())
}

#[test]
fn test_clear_registry() {
    let container = Container::new();
    container.bind("K1", ProvideOpts::value(1i32));
    container.bind("K2", ProvideOpts::value(2i32));
    container.clear_registry();

    assert!(container.get_registry().is_empty());
    for token in ["K1", "K2"] {
        assert!(matches!(
            container.resolve::<i32>(token),
            Err(DependencyError::NoSuchService { .. })
        ));
    }
}

#[test]
fn test_bind_many() -> Result<()> {
    let container = Container::new();
    container.bind_many(|binder| {
        binder.bind("K1", ProvideOpts::value(1i32));
        binder.bind("K2", ProvideOpts::value(2i32));
    });

    assert_eq!(*container.resolve::<i32>("K1")?, 1);
    assert_eq!(*container.resolve::<i32>("K2")?, 2);

    let keys: Vec<Token> = container.get_registry().keys().cloned().collect();
    assert_eq!(keys, vec![Token::from("K1"), Token::from("K2")]);
    Ok(())
}

#[test]
fn test_bind_many_keeps_partial_registration() {
    let container = Container::new();
    let result: Result<(), DependencyError> = container.bind_many(|binder| {
        binder.bind("K1", ProvideOpts::value(1i32));
        binder
            .bind("Broken", ProvideOpts::new())
            .set_scope(Scope::Singleton)?;
        binder.bind("K2", ProvideOpts::value(2i32));
        Ok(())
    });

    assert!(matches!(result, Err(DependencyError::NoProvider { .. })));
    let registry = container.get_registry();
    assert!(registry.contains_key(&Token::from("K1")));
    assert!(registry.contains_key(&Token::from("Broken")));
    assert!(!registry.contains_key(&Token::from("K2")));
}

#[test]
fn test_registry_snapshot_is_detached() {
    let container = Container::new();
    container.bind("K1", ProvideOpts::value(1i32));

    let snapshot = container.get_registry();
    container.bind("K2", ProvideOpts::value(2i32));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(container.get_registry().len(), 2);

    let descriptor = snapshot.get(&Token::from("K1")).unwrap();
    assert_eq!(descriptor.get_scope(), Scope::Transient);
}

#[test]
fn test_symbol_tokens() -> Result<()> {
    let container = Container::new();
    let first = Token::symbol("Logger");
    let second = Token::symbol("Logger");

    container.bind(first.clone(), ProvideOpts::value(String::from("first")));
    container.bind(second.clone(), ProvideOpts::value(String::from("second")));

    assert_eq!(container.resolve::<String>(&first)?.as_str(), "first");
    assert_eq!(container.resolve::<String>(&second)?.as_str(), "second");
    assert!(container.resolve::<String>("Logger").is_err());
    Ok(())
}

#[test]
fn test_configured_container() -> Result<()> {
    init_tracing();
    let config = ContainerConfig::from_json_str(
        r#"{ "name": "mail", "enable_performance_monitoring": true }"#,
    )?;
    let container = Container::with_config(config);
    container.bind("Port", ProvideOpts::value(25u16));

    assert_eq!(container.config().name, "mail");
    assert_eq!(*container.resolve::<u16>("Port")?, 25);
    assert_eq!(container.stats().resolutions, 1);
    Ok(())
}

#[test]
#[serial]
fn test_default_container_is_shared() -> Result<()> {
    container().clear_registry();
    container()
        .bind("Logger", ProvideOpts::class::<Logger>())
        .set_scope(Scope::Singleton)?;

    let first = container().resolve::<Logger>("Logger")?;
    let second = di_impl::container().resolve::<Logger>("Logger")?;
    assert!(Arc::ptr_eq(&first, &second));

    container().clear_registry();
    Ok(())
}

#[test]
#[serial]
fn test_default_container_clear() {
    container().clear_registry();
    container().bind("TestString", ProvideOpts::value(String::from("Test string")));
    assert!(container().get_registry().contains_key(&Token::from("TestString")));

    container().clear_registry();
    assert!(matches!(
        container().resolve::<String>("TestString"),
        Err(DependencyError::NoSuchService { .. })
    ));
}
