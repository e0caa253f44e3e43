// @generated by service_container. Do not edit by hand.
// Services: 2

#[allow(non_snake_case, dead_code)]
pub struct AppServices {
    factories: ::service_container::FactoryRegistry,
    shared: ::service_container::SharedInstances,
}

#[allow(non_snake_case, dead_code)]
impl AppServices {
    pub fn new(factories: ::service_container::FactoryRegistry) -> Self {
        Self {
            factories,
            shared: ::service_container::SharedInstances::new(),
        }
    }

    /// Service "logger" of class "Logger" (shared).
    pub fn getLogger(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.shared.get_or_construct("logger", || {
            self.factories.construct("Logger", vec![])
        })
    }

    /// Service "app" of class "App" (new instance per call).
    pub fn getApp(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.factories.construct("App", vec![
            ::service_container::Argument::from(self.getLogger()?),
            ::service_container::Argument::from(true),
        ])
    }
}

impl ::service_container::ServiceAccessors for AppServices {
    fn provide(
        &self,
        accessor: &str,
    ) -> Option<::service_container::ServiceResult<::service_container::Instance>> {
        match accessor {
            "Logger" => Some(self.getLogger()),
            "App" => Some(self.getApp()),
            _ => None,
        }
    }
}
