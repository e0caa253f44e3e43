// @generated by service_container. Do not edit by hand.
// Services: 4

#[allow(non_snake_case, dead_code)]
pub struct MailServices {
    factories: ::service_container::FactoryRegistry,
    shared: ::service_container::SharedInstances,
}

#[allow(non_snake_case, dead_code)]
impl MailServices {
    pub fn new(factories: ::service_container::FactoryRegistry) -> Self {
        Self {
            factories,
            shared: ::service_container::SharedInstances::new(),
        }
    }

    /// Service "logger" of class "Logger" (shared).
    pub fn getLogger(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.shared.get_or_construct("logger", || {
            self.factories.construct("Logger", vec![
                ::service_container::Argument::from("info"),
            ])
        })
    }

    /// Service "mailer.transport" of class "SmtpTransport" (shared).
    pub fn getMailerTransport(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.shared.get_or_construct("mailer.transport", || {
            self.factories.construct("SmtpTransport", vec![
                ::service_container::Argument::Table(vec![
                    (String::from("host"), ::service_container::Argument::from("localhost")),
                    (String::from("port"), ::service_container::Argument::from(25i64)),
                ]),
            ])
        })
    }

    /// Service "mailer" of class "Mailer" (shared).
    pub fn getMailer(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.shared.get_or_construct("mailer", || {
            self.factories.construct("Mailer", vec![
                ::service_container::Argument::from(self.getMailerTransport()?),
                ::service_container::Argument::from(self.getLogger()?),
                ::service_container::Argument::List(vec![
                    ::service_container::Argument::from("noreply@example.com"),
                ]),
            ])
        })
    }

    /// Service "app" of class "App" (new instance per call).
    pub fn getApp(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.factories.construct("App", vec![
            ::service_container::Argument::from(self.getLogger()?),
            ::service_container::Argument::from(self.getMailer()?),
            ::service_container::Argument::from(true),
        ])
    }
}

impl ::service_container::ServiceAccessors for MailServices {
    fn provide(
        &self,
        accessor: &str,
    ) -> Option<::service_container::ServiceResult<::service_container::Instance>> {
        match accessor {
            "Logger" => Some(self.getLogger()),
            "MailerTransport" => Some(self.getMailerTransport()),
            "Mailer" => Some(self.getMailer()),
            "App" => Some(self.getApp()),
            _ => None,
        }
    }
}
