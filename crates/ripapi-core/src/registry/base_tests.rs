    use super::*;
    use crate::test_support::RecordingModule;
    use async_trait::async_trait;
    use ripapi_protocols::error::ModuleError;
    use ripapi_protocols::module::ModuleManifest;
    use ripapi_protocols::types::Version;
    use tokio::sync::Notify;

    fn registry() -> ModuleRegistry<dyn Module> {
        ModuleRegistry::new()
    }

    #[test]
    fn test_registry_new() {
        let registry = registry();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_default() {
        let registry: ModuleRegistry<dyn Module> = ModuleRegistry::default();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_then_lookup() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        let expected: Arc<dyn Module> = module.clone();

        registry.register(module).unwrap();

        assert!(registry.contains("test-1"));
        let retrieved = registry.get("test-1").unwrap();
        assert!(Arc::ptr_eq(&retrieved, &expected));
        assert!(!registry.is_enabled("test-1"));
    }

    #[test]
    fn test_register_duplicate() {
        let registry = registry();
        let first = RecordingModule::new("test-1");
        let first_dyn: Arc<dyn Module> = first.clone();

        registry.register(first).unwrap();
        let result = registry.register(RecordingModule::new("test-1"));

        assert!(matches!(result, Err(RegistryError::DuplicateIdentifier(id)) if id == "test-1"));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.get("test-1").unwrap(), &first_dyn));
    }

    #[test]
    fn test_register_blank_id_rejected() {
        let registry = registry();
        let result = registry.register(RecordingModule::new("  "));
        assert!(matches!(result, Err(RegistryError::InvalidModule(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_nonexistent() {
        let registry = registry();
        assert!(registry.get("nonexistent").is_none());
        assert!(!registry.contains("nonexistent"));
        assert!(!registry.is_enabled("nonexistent"));
    }

    #[tokio::test]
    async fn test_unregister_nonexistent_is_noop() {
        let registry = registry();
        registry.register(RecordingModule::new("test-1")).unwrap();

        registry.unregister("nonexistent").await.unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_unregister_disabled_skips_destroy() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();

        registry.unregister("test-1").await.unwrap();

        assert!(!registry.contains("test-1"));
        assert_eq!(module.hooks.destroy_count(), 0);
    }

    #[tokio::test]
    async fn test_unregister_enabled_runs_destroy_once() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();
        registry.enable("test-1").await.unwrap();

        registry.unregister("test-1").await.unwrap();

        assert!(!registry.contains("test-1"));
        assert_eq!(module.hooks.destroy_count(), 1);
    }

    #[tokio::test]
    async fn test_unregister_removes_even_when_destroy_fails() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();
        registry.enable("test-1").await.unwrap();
        module.hooks.set_fail_destroy(true);

        let result = registry.unregister("test-1").await;

        assert!(matches!(result, Err(RegistryError::LifecycleHookFailure { .. })));
        assert!(!registry.contains("test-1"));
        assert!(registry.list_ids().is_empty());
        assert_eq!(module.hooks.destroy_count(), 1);
    }

    #[tokio::test]
    async fn test_enable_nonexistent() {
        let registry = registry();
        registry.register(RecordingModule::new("test-1")).unwrap();

        let result = registry.enable("missing").await;

        assert!(matches!(result, Err(RegistryError::NotFound(id)) if id == "missing"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_enable_twice_runs_init_once() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();

        registry.enable("test-1").await.unwrap();
        registry.enable("test-1").await.unwrap();

        assert!(registry.is_enabled("test-1"));
        assert_eq!(module.hooks.init_count(), 1);
    }

    #[tokio::test]
    async fn test_enable_failure_leaves_disabled_and_retry_works() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();
        module.hooks.set_fail_init(true);

        let result = registry.enable("test-1").await;
        assert!(matches!(result, Err(RegistryError::LifecycleHookFailure { ref id, .. }) if id == "test-1"));
        assert!(!registry.is_enabled("test-1"));

        module.hooks.set_fail_init(false);
        registry.enable("test-1").await.unwrap();
        assert!(registry.is_enabled("test-1"));
        assert_eq!(module.hooks.init_count(), 2);
    }

    #[tokio::test]
    async fn test_enable_then_disable() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();

        registry.enable("test-1").await.unwrap();
        registry.disable("test-1").await.unwrap();

        assert!(!registry.is_enabled("test-1"));
        assert_eq!(module.hooks.destroy_count(), 1);
    }

    #[tokio::test]
    async fn test_disable_failure_leaves_enabled() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();
        registry.enable("test-1").await.unwrap();
        module.hooks.set_fail_destroy(true);

        let result = registry.disable("test-1").await;

        assert!(matches!(result, Err(RegistryError::LifecycleHookFailure { .. })));
        assert!(registry.is_enabled("test-1"));
    }

    #[tokio::test]
    async fn test_disable_already_disabled_is_noop() {
        let registry = registry();
        let module = RecordingModule::new("test-1");
        registry.register(module.clone()).unwrap();

        registry.disable("test-1").await.unwrap();
        assert_eq!(module.hooks.destroy_count(), 0);
    }

    #[tokio::test]
    async fn test_disable_nonexistent() {
        let registry = registry();
        let result = registry.disable("missing").await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_enabled_preserves_registration_order() {
        let registry = registry();
        for id in ["c", "a", "b", "d"] {
            registry.register(RecordingModule::new(id)).unwrap();
        }

        registry.enable("d").await.unwrap();
        registry.enable("c").await.unwrap();
        registry.enable("b").await.unwrap();
        registry.disable("c").await.unwrap();

        let enabled: Vec<String> = registry
            .get_enabled()
            .iter()
            .map(|m| m.id().to_string())
            .collect();
        assert_eq!(enabled, vec!["b", "d"]);
        assert_eq!(registry.enabled_ids(), vec!["b", "d"]);
        assert_eq!(registry.get_all().len(), 4);
    }

    #[tokio::test]
    async fn test_list_ids_after_unregister() {
        let registry = registry();
        for id in ["one", "two", "three"] {
            registry.register(RecordingModule::new(id)).unwrap();
        }
        registry.unregister("two").await.unwrap();
        registry.register(RecordingModule::new("two")).unwrap();

        assert_eq!(registry.list_ids(), vec!["one", "three", "two"]);
    }

    #[tokio::test]
    async fn test_list_status_snapshot() {
        let registry = registry();
        registry.register(RecordingModule::new("one")).unwrap();
        registry.register(RecordingModule::new("two")).unwrap();
        registry.enable("two").await.unwrap();

        let list = registry.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "one");
        assert!(!list[0].enabled);
        assert_eq!(list[1].version, "1.0.0");
        assert!(list[1].enabled);
    }

    #[tokio::test]
    async fn test_initialize_all_isolates_failures() {
        let registry = registry();
        let a = RecordingModule::new("a");
        let b = RecordingModule::new("b");
        let c = RecordingModule::new("c");
        registry.register(a).unwrap();
        registry.register(b.clone()).unwrap();
        registry.register(c).unwrap();
        b.hooks.set_fail_init(true);

        let report = registry.initialize_all(&["a", "b", "c"]).await;

        assert!(registry.is_enabled("a"));
        assert!(!registry.is_enabled("b"));
        assert!(registry.is_enabled("c"));
        assert_eq!(report.succeeded, vec!["a", "c"]);
        assert_eq!(report.failed_ids(), vec!["b"]);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_initialize_all_continues_past_unknown_ids() {
        let registry = registry();
        registry.register(RecordingModule::new("a")).unwrap();

        let ids = vec!["ghost".to_string(), "a".to_string()];
        let report = registry.initialize_all(&ids).await;

        assert!(registry.is_enabled("a"));
        assert!(matches!(report.failed[0].1, RegistryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_initialize_all_counts_already_enabled_as_success() {
        let registry = registry();
        let module = RecordingModule::new("a");
        registry.register(module.clone()).unwrap();
        registry.enable("a").await.unwrap();

        let report = registry.initialize_all(&["a"]).await;

        assert!(report.is_clean());
        assert_eq!(module.hooks.init_count(), 1);
    }

    #[tokio::test]
    async fn test_destroy_all_isolates_failures() {
        let registry = registry();
        let a = RecordingModule::new("a");
        let b = RecordingModule::new("b");
        let c = RecordingModule::new("c");
        registry.register(a.clone()).unwrap();
        registry.register(b.clone()).unwrap();
        registry.register(c.clone()).unwrap();
        registry.initialize_all(&["a", "b", "c"]).await;
        b.hooks.set_fail_destroy(true);

        let report = registry.destroy_all().await;

        assert_eq!(report.succeeded, vec!["a", "c"]);
        assert_eq!(report.failed_ids(), vec!["b"]);
        assert_eq!(registry.enabled_ids(), vec!["b"]);
        assert_eq!(a.hooks.destroy_count(), 1);
        assert_eq!(c.hooks.destroy_count(), 1);
    }

    #[tokio::test]
    async fn test_destroy_all_skips_disabled() {
        let registry = registry();
        let a = RecordingModule::new("a");
        registry.register(a.clone()).unwrap();

        let report = registry.destroy_all().await;

        assert!(report.succeeded.is_empty());
        assert_eq!(a.hooks.destroy_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_enable_runs_init_once() {
        let registry = registry();
        let module = RecordingModule::new("a");
        registry.register(module.clone()).unwrap();

        let (first, second) = tokio::join!(registry.enable("a"), registry.enable("a"));

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(module.hooks.init_count(), 1);
    }

    /// Module whose `init` blocks until released.
    struct GatedModule {
        manifest: ModuleManifest,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Module for GatedModule {
        fn manifest(&self) -> &ModuleManifest {
            &self.manifest
        }

        async fn init(&self) -> Result<(), ModuleError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reads_during_pending_init_see_disabled() {
        let registry = Arc::new(registry());
        let gated = Arc::new(GatedModule {
            manifest: ModuleManifest::new("slow", "Slow", Version::new(0, 1, 0)),
            entered: Notify::new(),
            release: Notify::new(),
        });
        registry.register(gated.clone()).unwrap();

        let task = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.enable("slow").await })
        };

        gated.entered.notified().await;
        assert!(registry.contains("slow"));
        assert!(!registry.is_enabled("slow"));
        assert!(registry.get_enabled().is_empty());

        gated.release.notify_one();
        task.await.unwrap().unwrap();
        assert!(registry.is_enabled("slow"));
    }
