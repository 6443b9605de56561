use sea_orm::ActiveValue::{NotSet, Set};

use super::crud::Catalog;
use crate::entities::{
    branches, cities, countries, departments, employees, general_departments, medical_leaves,
    overtime_types, overtimes, vacation_types, vacations,
};

/// Lookup tables that carry nothing but a unique name.
macro_rules! named_catalog {
    ($entity:ident, $label:literal) => {
        impl Catalog for $entity::Entity {
            const LABEL: &'static str = $label;

            fn id(model: &Self::Model) -> i32 {
                model.id
            }

            fn name(model: &Self::Model) -> Option<&str> {
                Some(&model.name)
            }

            fn for_insert(model: Self::Model) -> Self::ActiveModel {
                $entity::ActiveModel {
                    id: NotSet,
                    name: Set(model.name),
                }
            }

            fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
                let mut active: $entity::ActiveModel = existing.into();
                active.name = Set(incoming.name);
                active
            }
        }
    };
}

named_catalog!(general_departments, "General department");
named_catalog!(countries, "Country");
named_catalog!(vacation_types, "Vacation type");
named_catalog!(overtime_types, "Overtime type");

impl Catalog for departments::Entity {
    const LABEL: &'static str = "Department";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(model: &Self::Model) -> Option<&str> {
        Some(&model.name)
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        departments::ActiveModel {
            id: NotSet,
            name: Set(model.name),
            general_department_id: Set(model.general_department_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: departments::ActiveModel = existing.into();
        active.name = Set(incoming.name);
        active.general_department_id = Set(incoming.general_department_id);
        active
    }
}

impl Catalog for branches::Entity {
    const LABEL: &'static str = "Branch";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(model: &Self::Model) -> Option<&str> {
        Some(&model.name)
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        branches::ActiveModel {
            id: NotSet,
            name: Set(model.name),
            department_id: Set(model.department_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: branches::ActiveModel = existing.into();
        active.name = Set(incoming.name);
        active.department_id = Set(incoming.department_id);
        active
    }
}

impl Catalog for cities::Entity {
    const LABEL: &'static str = "City";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(model: &Self::Model) -> Option<&str> {
        Some(&model.name)
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        cities::ActiveModel {
            id: NotSet,
            name: Set(model.name),
            country_id: Set(model.country_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: cities::ActiveModel = existing.into();
        active.name = Set(incoming.name);
        active.country_id = Set(incoming.country_id);
        active
    }
}

impl Catalog for employees::Entity {
    const LABEL: &'static str = "Employee";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(model: &Self::Model) -> Option<&str> {
        Some(&model.name)
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        employees::ActiveModel {
            id: NotSet,
            name: Set(model.name),
            civil_id: Set(model.civil_id),
            file_number: Set(model.file_number),
            job_name: Set(model.job_name),
            address: Set(model.address),
            telephone_number: Set(model.telephone_number),
            photo: Set(model.photo),
            other: Set(model.other),
            branch_id: Set(model.branch_id),
            city_id: Set(model.city_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: employees::ActiveModel = existing.into();
        active.name = Set(incoming.name);
        active.civil_id = Set(incoming.civil_id);
        active.file_number = Set(incoming.file_number);
        active.job_name = Set(incoming.job_name);
        active.address = Set(incoming.address);
        active.telephone_number = Set(incoming.telephone_number);
        active.photo = Set(incoming.photo);
        active.other = Set(incoming.other);
        active.branch_id = Set(incoming.branch_id);
        active.city_id = Set(incoming.city_id);
        active
    }
}

impl Catalog for vacations::Entity {
    const LABEL: &'static str = "Vacation";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(_model: &Self::Model) -> Option<&str> {
        None
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        vacations::ActiveModel {
            id: NotSet,
            employee_id: Set(model.employee_id),
            start_date: Set(model.start_date),
            end_date: Set(model.end_date),
            vacation_type_id: Set(model.vacation_type_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: vacations::ActiveModel = existing.into();
        active.start_date = Set(incoming.start_date);
        active.end_date = Set(incoming.end_date);
        active.vacation_type_id = Set(incoming.vacation_type_id);
        active
    }
}

impl Catalog for overtimes::Entity {
    const LABEL: &'static str = "Overtime";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(_model: &Self::Model) -> Option<&str> {
        None
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        overtimes::ActiveModel {
            id: NotSet,
            employee_id: Set(model.employee_id),
            start_date: Set(model.start_date),
            end_date: Set(model.end_date),
            overtime_type_id: Set(model.overtime_type_id),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: overtimes::ActiveModel = existing.into();
        active.start_date = Set(incoming.start_date);
        active.end_date = Set(incoming.end_date);
        active.overtime_type_id = Set(incoming.overtime_type_id);
        active
    }
}

impl Catalog for medical_leaves::Entity {
    const LABEL: &'static str = "Medical leave";

    fn id(model: &Self::Model) -> i32 {
        model.id
    }

    fn name(_model: &Self::Model) -> Option<&str> {
        None
    }

    fn for_insert(model: Self::Model) -> Self::ActiveModel {
        medical_leaves::ActiveModel {
            id: NotSet,
            employee_id: Set(model.employee_id),
            date: Set(model.date),
            medical_diagnose: Set(model.medical_diagnose),
            medical_recommendation: Set(model.medical_recommendation),
        }
    }

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel {
        let mut active: medical_leaves::ActiveModel = existing.into();
        active.date = Set(incoming.date);
        active.medical_diagnose = Set(incoming.medical_diagnose);
        active.medical_recommendation = Set(incoming.medical_recommendation);
        active
    }
}
