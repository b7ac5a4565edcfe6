//! 数据模型：目标课程、字段链、下拉选项

pub mod class_loader;
pub mod desired_class;
pub mod field;

pub use class_loader::load_classes;
pub use desired_class::{ClassList, DesiredClass};
pub use field::{FieldKey, FieldSpec, ReadyCheck, SelectOption, FIELD_CHAIN};
