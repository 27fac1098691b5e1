//! # 依赖注入具体实现
//!
//! 提供按名称注册组件定义的容器实现，以及对应的容器构建器。
//! 组件定义分为两类：Verticle 定义可通过 [`Container::instantiate`] 取得，
//! 普通组件通过 [`DiContainerImpl::resolve`] 按类型取得。

use di_abstractions::Container;
use infrastructure_common::{
    BoxError, ComponentDescriptor, DependencyError, DependencyResult, Lifetime, Verticle,
    VerticleRef,
};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Verticle 创建函数
type VerticleFactoryFn = Arc<dyn Fn() -> Result<VerticleRef, BoxError> + Send + Sync>;

/// 普通组件创建函数
type ComponentFactoryFn =
    Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, BoxError> + Send + Sync>;

/// 组件实例化方式
#[derive(Clone)]
enum Instantiator {
    Verticle(VerticleFactoryFn),
    Component(ComponentFactoryFn),
}

/// 已创建的组件实例
#[derive(Clone)]
enum Instance {
    Verticle(VerticleRef),
    Component(Arc<dyn Any + Send + Sync>),
}

/// 组件注册信息
struct ComponentRegistration {
    /// 组件描述符
    descriptor: ComponentDescriptor,
    /// 实例化方式
    instantiator: Instantiator,
    /// 单例实例（仅单例生命周期使用）
    singleton: OnceCell<Instance>,
}

impl ComponentRegistration {
    fn new(descriptor: ComponentDescriptor, instantiator: Instantiator) -> Self {
        Self {
            descriptor,
            instantiator,
            singleton: OnceCell::new(),
        }
    }

    /// 按生命周期取得实例
    fn instance(&self) -> DependencyResult<Instance> {
        match self.descriptor.lifetime {
            Lifetime::Singleton => self.singleton.get_or_try_init(|| self.create()).cloned(),
            Lifetime::Transient => self.create(),
        }
    }

    /// 调用创建函数生成新实例
    fn create(&self) -> DependencyResult<Instance> {
        let name = &self.descriptor.name;
        debug!("创建组件实例: {} ({})", name, self.descriptor.lifetime);

        let created = match &self.instantiator {
            Instantiator::Verticle(factory) => factory().map(Instance::Verticle),
            Instantiator::Component(factory) => factory().map(Instance::Component),
        };

        created.map_err(|source| {
            warn!("组件创建失败: {}, 原因: {}", name, source);
            DependencyError::ComponentCreationFailed {
                name: name.clone(),
                source,
            }
        })
    }

    fn type_mismatch(&self, expected: &str) -> DependencyError {
        DependencyError::TypeMismatch {
            name: self.descriptor.name.clone(),
            expected: expected.to_string(),
            actual: self.descriptor.type_info.module_path.clone(),
        }
    }
}

/// 具体的依赖注入容器实现
///
/// 注册完成后容器只读，可以通过 `Arc<dyn Container>` 在线程间共享。
#[derive(Default)]
pub struct DiContainerImpl {
    /// 组件注册信息，按名称索引
    registrations: HashMap<String, ComponentRegistration>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建容器构建器
    pub fn builder() -> DiContainerBuilder {
        DiContainerBuilder::new()
    }

    /// 注册 Verticle 定义
    pub fn register_verticle<V, F>(
        &mut self,
        name: impl Into<String>,
        lifetime: Lifetime,
        factory: F,
    ) -> DependencyResult<()>
    where
        V: Verticle,
        F: Fn() -> Result<V, BoxError> + Send + Sync + 'static,
    {
        let descriptor = ComponentDescriptor::new::<V>(name, lifetime).as_verticle();
        let instantiator = Instantiator::Verticle(Arc::new(move || {
            factory().map(|verticle| Arc::new(verticle) as VerticleRef)
        }));
        self.insert(ComponentRegistration::new(descriptor, instantiator))
    }

    /// 注册已创建的 Verticle 实例，生命周期为单例
    pub fn register_verticle_instance<V>(
        &mut self,
        name: impl Into<String>,
        instance: Arc<V>,
    ) -> DependencyResult<()>
    where
        V: Verticle,
    {
        let descriptor = ComponentDescriptor::new::<V>(name, Lifetime::Singleton).as_verticle();
        let shared: VerticleRef = instance;
        let registration = ComponentRegistration::new(
            descriptor,
            Instantiator::Verticle(Arc::new({
                let shared = Arc::clone(&shared);
                move || -> Result<VerticleRef, BoxError> { Ok(Arc::clone(&shared)) }
            })),
        );
        let _ = registration.singleton.set(Instance::Verticle(shared));
        self.insert(registration)
    }

    /// 注册普通组件定义
    pub fn register_component<T, F>(
        &mut self,
        name: impl Into<String>,
        lifetime: Lifetime,
        factory: F,
    ) -> DependencyResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let descriptor = ComponentDescriptor::new::<T>(name, lifetime);
        let instantiator = Instantiator::Component(Arc::new(move || {
            factory().map(|component| Arc::new(component) as Arc<dyn Any + Send + Sync>)
        }));
        self.insert(ComponentRegistration::new(descriptor, instantiator))
    }

    /// 注册普通组件实例，生命周期为单例
    pub fn register_instance<T>(
        &mut self,
        name: impl Into<String>,
        instance: T,
    ) -> DependencyResult<()>
    where
        T: Send + Sync + 'static,
    {
        let descriptor = ComponentDescriptor::new::<T>(name, Lifetime::Singleton);
        let shared: Arc<dyn Any + Send + Sync> = Arc::new(instance);
        let registration = ComponentRegistration::new(
            descriptor,
            Instantiator::Component(Arc::new({
                let shared = Arc::clone(&shared);
                move || -> Result<Arc<dyn Any + Send + Sync>, BoxError> { Ok(Arc::clone(&shared)) }
            })),
        );
        let _ = registration.singleton.set(Instance::Component(shared));
        self.insert(registration)
    }

    fn insert(&mut self, registration: ComponentRegistration) -> DependencyResult<()> {
        let name = registration.descriptor.name.clone();

        if name.trim().is_empty() {
            return Err(DependencyError::RegistrationError {
                name,
                message: "组件名称不能为空".to_string(),
            });
        }
        if self.registrations.contains_key(&name) {
            return Err(DependencyError::RegistrationError {
                name,
                message: "组件名称已存在".to_string(),
            });
        }

        info!(
            "注册组件: {} ({}, {})",
            name,
            registration.descriptor.type_info.module_path,
            registration.descriptor.lifetime
        );
        self.registrations.insert(name, registration);
        Ok(())
    }

    /// 按名称解析普通组件
    pub fn resolve<T>(&self, name: &str) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let registration = self.registration(name)?;
        match registration.instance()? {
            Instance::Component(component) => component
                .downcast::<T>()
                .map_err(|_| registration.type_mismatch(std::any::type_name::<T>())),
            Instance::Verticle(_) => Err(registration.type_mismatch(std::any::type_name::<T>())),
        }
    }

    /// 获取组件描述符
    pub fn descriptor(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.registrations.get(name).map(|reg| &reg.descriptor)
    }

    /// 获取所有组件描述符，按优先级从高到低、名称升序排列
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        let mut descriptors: Vec<ComponentDescriptor> = self
            .registrations
            .values()
            .map(|reg| reg.descriptor.clone())
            .collect();
        descriptors.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        descriptors
    }

    /// 已注册的组件数量
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// 验证容器状态
    ///
    /// 预先创建所有单例组件，收集创建失败的错误。
    pub fn validate(&self) -> Result<(), Vec<DependencyError>> {
        info!("验证容器状态，共 {} 个组件", self.registrations.len());

        let errors: Vec<DependencyError> = self
            .registrations
            .values()
            .filter(|reg| reg.descriptor.lifetime == Lifetime::Singleton)
            .filter_map(|reg| reg.instance().err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn registration(&self, name: &str) -> DependencyResult<&ComponentRegistration> {
        self.registrations
            .get(name)
            .ok_or_else(|| DependencyError::not_registered(name))
    }
}

impl Container for DiContainerImpl {
    fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    fn lifetime_of(&self, name: &str) -> DependencyResult<Lifetime> {
        self.registration(name).map(|reg| reg.descriptor.lifetime)
    }

    fn instantiate(&self, name: &str) -> DependencyResult<VerticleRef> {
        let registration = self.registration(name)?;
        if !registration.descriptor.verticle {
            return Err(registration.type_mismatch("Verticle"));
        }

        match registration.instance()? {
            Instance::Verticle(verticle) => Ok(verticle),
            Instance::Component(_) => Err(registration.type_mismatch("Verticle")),
        }
    }

    fn component_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registrations.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for DiContainerImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiContainerImpl")
            .field("components", &self.component_names())
            .finish()
    }
}

/// 容器构建器实现
///
/// 注册错误在 [`build`](DiContainerBuilder::build) 时统一返回。
#[derive(Debug, Default)]
pub struct DiContainerBuilder {
    container: DiContainerImpl,
    errors: Vec<DependencyError>,
}

impl DiContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 Verticle 定义
    pub fn verticle<V, F>(mut self, name: impl Into<String>, lifetime: Lifetime, factory: F) -> Self
    where
        V: Verticle,
        F: Fn() -> Result<V, BoxError> + Send + Sync + 'static,
    {
        let result = self.container.register_verticle(name, lifetime, factory);
        self.record(result)
    }

    /// 添加单例 Verticle 实例
    pub fn verticle_instance<V>(mut self, name: impl Into<String>, instance: Arc<V>) -> Self
    where
        V: Verticle,
    {
        let result = self.container.register_verticle_instance(name, instance);
        self.record(result)
    }

    /// 添加普通组件定义
    pub fn component<T, F>(mut self, name: impl Into<String>, lifetime: Lifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let result = self.container.register_component(name, lifetime, factory);
        self.record(result)
    }

    /// 添加普通组件实例
    pub fn instance<T>(mut self, name: impl Into<String>, instance: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let result = self.container.register_instance(name, instance);
        self.record(result)
    }

    fn record(mut self, result: DependencyResult<()>) -> Self {
        if let Err(error) = result {
            self.errors.push(error);
        }
        self
    }

    /// 构建容器，返回第一个注册错误（如果有）
    pub fn build(self) -> DependencyResult<DiContainerImpl> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        info!("构建容器完成，注册了 {} 个组件", self.container.len());
        Ok(self.container)
    }
}
