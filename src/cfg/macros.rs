//! 配置类型相关的宏定义
//!
//! 组件通过 `Type::new(config)` 从配置结构构造，这里的宏生成对应的 From 实现，
//! 以及到 trait object 的装箱转换。

/// 为配置类型自动实现 From trait，调用 `Type::new(config)`
///
/// 用法：`impl_from!(ConsoleLoggerConfig => ConsoleLogger)`
#[macro_export]
macro_rules! impl_from {
    ($config_type:ty => $target_type:ty) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                <$target_type>::new(config)
            }
        }
    };
}

/// 为 Box<T> 类型自动实现到 Box<dyn Trait> 的转换
///
/// 用法：`impl_box_from!(EnvSource => dyn KeyValueSource)`
#[macro_export]
macro_rules! impl_box_from {
    ($source_type:ty => dyn $trait_name:path) => {
        impl From<Box<$source_type>> for Box<dyn $trait_name> {
            fn from(source: Box<$source_type>) -> Self {
                source as Box<dyn $trait_name>
            }
        }
    };
}

#[cfg(test)]
mod tests {
    struct PrefixConfig {
        prefix: String,
    }

    struct PrefixedKey {
        prefix: String,
    }

    impl PrefixedKey {
        fn new(config: PrefixConfig) -> Self {
            Self {
                prefix: config.prefix,
            }
        }
    }

    trait KeyName {
        fn key_for(&self, name: &str) -> String;
    }

    impl KeyName for PrefixedKey {
        fn key_for(&self, name: &str) -> String {
            format!("{}{}", self.prefix, name)
        }
    }

    impl_from!(PrefixConfig => PrefixedKey);
    impl_box_from!(PrefixedKey => dyn KeyName);

    #[test]
    fn test_impl_from_new() {
        let key = PrefixedKey::from(PrefixConfig {
            prefix: "METRICX_".to_string(),
        });
        assert_eq!(key.key_for("UseBuckets"), "METRICX_UseBuckets");
    }

    #[test]
    fn test_impl_box_from() {
        let key = PrefixedKey::from(PrefixConfig {
            prefix: "APP_".to_string(),
        });
        let boxed: Box<dyn KeyName> = Box::new(key).into();
        assert_eq!(boxed.key_for("RoundingMethod"), "APP_RoundingMethod");
    }
}
