//! Scenario tests for the cost calculators
//!
//! These build small catalogs and topologies in memory and check the
//! computed totals and envelopes end to end.

#[cfg(test)]
mod runtime_scenarios {
    use crate::calculator::runtime_cost;
    use crate::catalog::{Flavor, FlavorCatalog};
    use crate::models::RuntimeConfig;
    use crate::scaling::{DayOfWeek, HourlyConfig, SchedulePreset, ScalingProfile, WeeklySchedule};

    fn flavors() -> FlavorCatalog {
        FlavorCatalog::new(vec![
            Flavor::new("S", 0.02),
            Flavor::new("M", 0.05),
            Flavor::new("L", 0.1),
        ])
    }

    fn peak() -> ScalingProfile {
        ScalingProfile {
            id: "peak".to_string(),
            name: "Peak".to_string(),
            min_instances: 1,
            max_instances: 5,
            min_flavor_name: "S".to_string(),
            max_flavor_name: "L".to_string(),
            enabled: true,
        }
    }

    fn small() -> ScalingProfile {
        ScalingProfile {
            id: "small".to_string(),
            name: "Small".to_string(),
            min_instances: 1,
            max_instances: 2,
            min_flavor_name: "S".to_string(),
            max_flavor_name: "M".to_string(),
            enabled: true,
        }
    }

    fn scaling(schedule: WeeklySchedule) -> RuntimeConfig {
        RuntimeConfig::fixed("rt_1", "node", "S", 1).with_scaling(vec![peak(), small()], schedule)
    }

    #[test]
    fn test_fixed_runtime_monthly_cost() {
        let runtime = RuntimeConfig::fixed("rt_1", "node", "S", 1);
        let detail = runtime_cost(&runtime, &flavors());

        // 1 x 0.02 x 730h
        assert_eq!(detail.total_monthly_cost, 14.6);
        assert_eq!(detail.min_monthly_cost, detail.total_monthly_cost);
        assert_eq!(detail.max_monthly_cost, detail.total_monthly_cost);
        assert_eq!(detail.base_monthly_cost, 14.6);
        assert_eq!(detail.estimated_scaling_cost, 0.0);
        assert_eq!(detail.scaling_hours, 0);
        assert!(!detail.has_range());
    }

    #[test]
    fn test_fixed_runtime_multiplies_instances() {
        let runtime = RuntimeConfig::fixed("rt_1", "node", "M", 3);
        let detail = runtime_cost(&runtime, &flavors());
        // 3 x 0.05 x 730h
        assert_eq!(detail.total_monthly_cost, 109.5);
        assert_eq!(detail.base_hourly_price, 0.05);
    }

    #[test]
    fn test_baseline_schedule_costs_minimum() {
        let detail = runtime_cost(&scaling(WeeklySchedule::empty()), &flavors());

        // 0.02 x 168h x 4.33 weeks
        assert_eq!(detail.min_monthly_cost, 14.55);
        assert_eq!(detail.total_monthly_cost, detail.min_monthly_cost);
        assert_eq!(detail.estimated_scaling_cost, 0.0);
        assert_eq!(detail.scaling_hours, 0);
        assert_eq!(detail.average_load_level, 0.0);
        assert!(detail.scaling_hours_by_profile.is_empty());
    }

    #[test]
    fn test_max_schedule_costs_maximum() {
        let detail = runtime_cost(&scaling(WeeklySchedule::uniform("peak", 5)), &flavors());

        // 5 x 0.1 x 168h x 4.33 weeks
        assert_eq!(detail.max_monthly_cost, 363.72);
        assert_eq!(detail.total_monthly_cost, detail.max_monthly_cost);
        assert_eq!(detail.scaling_hours, 168);
        assert_eq!(detail.average_load_level, 5.0);
        assert_eq!(detail.scaling_hours_by_profile.get("peak"), Some(&168));
        assert!(detail.has_range());
    }

    #[test]
    fn test_envelope_ignores_schedule_contents() {
        let empty = runtime_cost(&scaling(WeeklySchedule::empty()), &flavors());
        let busy = runtime_cost(
            &scaling(SchedulePreset::BusinessHours.generate("small", 4)),
            &flavors(),
        );
        assert_eq!(empty.min_monthly_cost, busy.min_monthly_cost);
        assert_eq!(empty.max_monthly_cost, busy.max_monthly_cost);
        assert!(busy.total_monthly_cost > empty.total_monthly_cost);
        assert!(busy.total_monthly_cost < busy.max_monthly_cost);
    }

    #[test]
    fn test_envelope_uses_richest_enabled_profile() {
        let mut profiles = vec![peak(), small()];
        profiles[0].enabled = false;
        let runtime = RuntimeConfig::fixed("rt_1", "node", "S", 1)
            .with_scaling(profiles, WeeklySchedule::empty());
        let detail = runtime_cost(&runtime, &flavors());

        // small at level 5: 2 x 0.05 x 168h x 4.33 weeks
        assert_eq!(detail.max_monthly_cost, 72.74);
    }

    #[test]
    fn test_baseline_richer_than_profiles_bounds_maximum() {
        let runtime = RuntimeConfig::fixed("rt_1", "node", "L", 4)
            .with_scaling(vec![small()], WeeklySchedule::uniform("small", 5));
        let detail = runtime_cost(&runtime, &flavors());
        assert_eq!(detail.max_monthly_cost, detail.min_monthly_cost);
        assert!(detail.total_monthly_cost < detail.min_monthly_cost);
        assert_eq!(detail.estimated_scaling_cost, 0.0);
    }

    #[test]
    fn test_business_hours_schedule() {
        let detail = runtime_cost(
            &scaling(SchedulePreset::BusinessHours.generate("peak", 5)),
            &flavors(),
        );

        // 45h x 0.5 + 123h x 0.02 = 24.96 per week
        assert_eq!(detail.scaling_hours, 45);
        assert_eq!(detail.total_monthly_cost, 108.08);
        assert_eq!(detail.estimated_scaling_cost, 93.53);
        assert_eq!(detail.average_load_level, 5.0);

        let by_profile: f64 = detail.cost_by_profile.values().sum();
        assert!((by_profile - detail.total_monthly_cost).abs() < 0.02);
        assert!(detail.cost_by_profile.contains_key("baseline"));
        assert!(detail.cost_by_profile.contains_key("peak"));
    }

    #[test]
    fn test_average_load_level_is_one_decimal() {
        let mut schedule = WeeklySchedule::empty();
        schedule.set(DayOfWeek::Mon, 9, HourlyConfig::new("peak", 1));
        schedule.set(DayOfWeek::Mon, 10, HourlyConfig::new("peak", 2));
        schedule.set(DayOfWeek::Mon, 11, HourlyConfig::new("small", 2));
        let detail = runtime_cost(&scaling(schedule), &flavors());

        assert_eq!(detail.scaling_hours, 3);
        assert_eq!(detail.average_load_level, 1.7);
        assert_eq!(detail.scaling_hours_by_profile.get("peak"), Some(&2));
        assert_eq!(detail.scaling_hours_by_profile.get("small"), Some(&1));
    }

    #[test]
    fn test_disabled_profiles_match_fixed_pricing() {
        let mut profile = peak();
        profile.enabled = false;
        let runtime = RuntimeConfig::fixed("rt_1", "node", "S", 1)
            .with_scaling(vec![profile], WeeklySchedule::uniform("peak", 5));
        let fixed = RuntimeConfig::fixed("rt_1", "node", "S", 1);

        let scaled = runtime_cost(&runtime, &flavors());
        let flat = runtime_cost(&fixed, &flavors());
        assert_eq!(scaled.total_monthly_cost, flat.total_monthly_cost);
        assert_eq!(scaled.min_monthly_cost, scaled.max_monthly_cost);
    }

    #[test]
    fn test_dangling_profile_reference_degrades_to_baseline() {
        let schedule = WeeklySchedule::uniform("prof_removed", 4);
        let detail = runtime_cost(&scaling(schedule), &flavors());
        assert_eq!(detail.total_monthly_cost, detail.min_monthly_cost);
        assert_eq!(detail.scaling_hours, 0);
    }

    #[test]
    fn test_unknown_flavor_prices_at_zero() {
        let runtime = RuntimeConfig::fixed("rt_1", "node", "XXL", 2);
        let detail = runtime_cost(&runtime, &flavors());
        assert_eq!(detail.total_monthly_cost, 0.0);
        assert_eq!(detail.base_hourly_price, 0.0);
    }

    #[test]
    fn test_runtime_name_falls_back_to_type() {
        let mut runtime = RuntimeConfig::fixed("rt_1", "node", "S", 1);
        assert_eq!(runtime_cost(&runtime, &flavors()).runtime_name, "node");
        runtime.instance_name = "Node.js".to_string();
        assert_eq!(runtime_cost(&runtime, &flavors()).runtime_name, "Node.js");
    }
}

#[cfg(test)]
mod project_scenarios {
    use crate::calculator::project_cost;
    use crate::catalog::{Flavor, FlavorCatalog, InstanceCatalog, InstanceType};
    use crate::models::{AddonConfig, Project, RuntimeConfig};
    use crate::pricing::{PricingTier, UsageBasedPricing, UsageMetric, UsagePricingRegistry};
    use crate::scaling::{ScalingProfile, WeeklySchedule};

    fn catalog() -> InstanceCatalog {
        InstanceCatalog::new(vec![InstanceType {
            instance_type: "node".to_string(),
            name: "Node.js".to_string(),
            flavors: FlavorCatalog::new(vec![Flavor::new("S", 0.02), Flavor::new("L", 0.1)]),
        }])
    }

    fn registry() -> UsagePricingRegistry {
        [UsageBasedPricing {
            provider_id: "cellar-addon".to_string(),
            metrics: vec![UsageMetric {
                id: "storage_gb".to_string(),
                name: "Storage".to_string(),
                unit: "GB".to_string(),
                free_quota: 100.0,
                tiers: vec![PricingTier::open(0.0, 0.02)],
                default_value: 150.0,
                min_value: 0.0,
                max_value: 10_000.0,
                step: 10.0,
            }],
            pricing_description: String::new(),
        }]
        .into_iter()
        .collect()
    }

    fn addon(id: &str, provider_id: &str, monthly_price: f64) -> AddonConfig {
        AddonConfig {
            id: id.to_string(),
            provider_id: provider_id.to_string(),
            provider_name: provider_id.to_string(),
            plan_name: "XS".to_string(),
            monthly_price,
            usage_estimates: None,
        }
    }

    fn project() -> Project {
        let peak = ScalingProfile {
            id: "peak".to_string(),
            name: "Peak".to_string(),
            min_instances: 1,
            max_instances: 5,
            min_flavor_name: "S".to_string(),
            max_flavor_name: "L".to_string(),
            enabled: true,
        };
        Project {
            id: "proj_1".to_string(),
            organization_id: "org_1".to_string(),
            name: "Shop".to_string(),
            created_at: None,
            updated_at: None,
            runtimes: vec![
                RuntimeConfig::fixed("rt_fixed", "node", "S", 1),
                RuntimeConfig::fixed("rt_scaling", "node", "S", 1)
                    .with_scaling(vec![peak], WeeklySchedule::uniform("peak", 5)),
            ],
            addons: vec![
                addon("addon_pg", "postgresql-addon", 10.0),
                addon("addon_cellar", "cellar-addon", 0.0),
            ],
        }
    }

    #[test]
    fn test_project_totals() {
        let summary = project_cost(&project(), Some(&catalog()), &registry()).unwrap();

        assert_eq!(summary.runtimes_detail.len(), 2);
        assert_eq!(summary.addons_detail.len(), 2);
        // 14.60 fixed + 363.72 scaling
        assert_eq!(summary.runtimes_cost, 378.32);
        // 10 flat + 1 usage
        assert_eq!(summary.addons_cost, 11.0);
        assert_eq!(summary.total_monthly_cost, 389.32);
    }

    #[test]
    fn test_project_envelope_includes_addons() {
        let summary = project_cost(&project(), Some(&catalog()), &registry()).unwrap();
        // 14.60 + 14.55 + 11
        assert_eq!(summary.min_monthly_cost, 40.15);
        assert_eq!(summary.max_monthly_cost, 389.32);
    }

    #[test]
    fn test_catalog_not_loaded() {
        assert!(project_cost(&project(), None, &registry()).is_none());
    }

    #[test]
    fn test_unknown_instance_type_prices_at_zero() {
        let mut project = project();
        project.runtimes = vec![RuntimeConfig::fixed("rt_py", "python", "S", 1)];
        let summary = project_cost(&project, Some(&catalog()), &registry()).unwrap();
        assert_eq!(summary.runtimes_cost, 0.0);
        assert_eq!(summary.total_monthly_cost, summary.addons_cost);
    }

    #[test]
    fn test_empty_project() {
        let project = Project {
            runtimes: Vec::new(),
            addons: Vec::new(),
            ..project()
        };
        let summary = project_cost(&project, Some(&catalog()), &registry()).unwrap();
        assert_eq!(summary.total_monthly_cost, 0.0);
        assert_eq!(summary.min_monthly_cost, 0.0);
        assert_eq!(summary.max_monthly_cost, 0.0);
    }

    #[test]
    fn test_project_cost_is_idempotent() {
        let project = project();
        let catalog = catalog();
        let registry = registry();

        let first = project_cost(&project, Some(&catalog), &registry).unwrap();
        let second = project_cost(&project, Some(&catalog), &registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[cfg(test)]
mod organization_scenarios {
    use crate::calculator::{
        organization_cost, project_over, projections, suggested_budgets, BudgetLevel, BudgetStatus,
        PROJECTION_HORIZONS,
    };
    use crate::models::{Organization, Project, ProjectCostSummary};

    fn summary(id: &str, total: f64, min: f64, max: f64) -> ProjectCostSummary {
        ProjectCostSummary {
            project_id: id.to_string(),
            project_name: id.to_uppercase(),
            runtimes_cost: total,
            runtimes_detail: Vec::new(),
            addons_cost: 0.0,
            addons_detail: Vec::new(),
            total_monthly_cost: total,
            min_monthly_cost: min,
            max_monthly_cost: max,
        }
    }

    fn project(id: &str, organization_id: &str) -> Project {
        Project {
            id: id.to_string(),
            organization_id: organization_id.to_string(),
            name: id.to_uppercase(),
            created_at: None,
            updated_at: None,
            runtimes: Vec::new(),
            addons: Vec::new(),
        }
    }

    fn organization(budget_target: Option<f64>) -> Organization {
        Organization {
            id: "org_1".to_string(),
            name: "Acme".to_string(),
            budget_target,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_rollup_counts_member_projects_only() {
        let projects = vec![
            project("a", "org_1"),
            project("b", "org_1"),
            project("c", "org_2"),
        ];
        let summaries = vec![
            summary("a", 30.0, 20.0, 50.0),
            summary("b", 70.0, 70.0, 70.0),
            summary("c", 1000.0, 1000.0, 1000.0),
        ];

        let rollup = organization_cost(&organization(None), &projects, &summaries);
        assert_eq!(rollup.project_count, 2);
        assert_eq!(rollup.total_monthly_cost, 100.0);
        assert_eq!(rollup.min_monthly_cost, 90.0);
        assert_eq!(rollup.max_monthly_cost, 120.0);
        assert!(rollup.budget.is_none());

        assert_eq!(rollup.projects[0].project_id, "b");
        assert_eq!(rollup.projects[0].share_percent, 70.0);
        assert_eq!(rollup.projects[1].share_percent, 30.0);
    }

    #[test]
    fn test_rollup_with_budget() {
        let projects = vec![project("a", "org_1")];
        let summaries = vec![summary("a", 85.0, 60.0, 140.0)];

        let rollup = organization_cost(&organization(Some(100.0)), &projects, &summaries);
        let budget = rollup.budget.unwrap();
        assert_eq!(budget.level, BudgetLevel::NearLimit);
        assert_eq!(budget.utilization_percent, 85.0);
        assert_eq!(budget.max_utilization_percent, 140.0);
        assert_eq!(budget.remaining, 15.0);
        assert!(budget.range_exceeds_target());
    }

    #[test]
    fn test_budget_thresholds() {
        let level = |total: f64| BudgetStatus::evaluate(Some(100.0), total, total).unwrap().level;
        assert_eq!(level(0.0), BudgetLevel::WithinBudget);
        assert_eq!(level(79.99), BudgetLevel::WithinBudget);
        assert_eq!(level(80.0), BudgetLevel::NearLimit);
        assert_eq!(level(100.0), BudgetLevel::NearLimit);
        assert_eq!(level(100.01), BudgetLevel::OverBudget);
    }

    #[test]
    fn test_non_positive_budget_has_no_status() {
        assert!(BudgetStatus::evaluate(Some(0.0), 10.0, 10.0).is_none());
        assert!(BudgetStatus::evaluate(Some(-5.0), 10.0, 10.0).is_none());
        assert!(BudgetStatus::evaluate(None, 10.0, 10.0).is_none());
    }

    #[test]
    fn test_over_budget_does_not_flag_range() {
        let status = BudgetStatus::evaluate(Some(100.0), 150.0, 200.0).unwrap();
        assert_eq!(status.level, BudgetLevel::OverBudget);
        assert_eq!(status.remaining, -50.0);
        assert!(!status.range_exceeds_target());
    }

    #[test]
    fn test_suggested_budgets() {
        let values: Vec<f64> = suggested_budgets(100.0).iter().map(|s| s.value).collect();
        assert_eq!(values, vec![110.0, 120.0, 150.0]);

        let suggestions = suggested_budgets(123.0);
        assert_eq!(suggestions[0].label, "+10%");
        let values: Vec<f64> = suggestions.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![140.0, 150.0, 190.0]);
    }

    #[test]
    fn test_projection_over_a_year() {
        let monthly = summary("a", 389.32, 40.15, 389.32);
        let year = project_over(&monthly, 12);
        assert_eq!(year.months, 12);
        assert_eq!(year.total, 4671.84);
        assert_eq!(year.min, 481.8);
        assert_eq!(year.max, 4671.84);
    }

    #[test]
    fn test_projections_cover_standard_horizons() {
        let monthly = summary("a", 10.0, 10.0, 10.0);
        let all = projections(&monthly);
        let months: Vec<u32> = all.iter().map(|p| p.months).collect();
        assert_eq!(months, PROJECTION_HORIZONS.to_vec());
        assert_eq!(all.last().unwrap().total, 360.0);
    }
}
