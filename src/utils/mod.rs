//! Helper macros shared by the configuration and record types.

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
