//! Terminal output of a resolved address plan.

use crate::models::AddressPlan;
use colored::Colorize;

/// One printable line of the plan summary.
#[derive(Debug, PartialEq, Eq)]
pub struct PlanRow {
    /// "cluster", "service" or "apiserver".
    pub role: &'static str,
    pub cidr: String,
    pub family: String,
    /// Node mask size, cluster rows only.
    pub node_mask: String,
    /// Node subnets that fit, cluster rows only.
    pub node_subnets: String,
}

/// Build the summary rows for a plan, cluster CIDRs first in allocator order.
pub fn plan_rows(plan: &AddressPlan) -> Vec<PlanRow> {
    let mut rows = Vec::new();

    if let Some(node_ipam) = &plan.node_ipam {
        for (cidr, mask) in node_ipam.pairs() {
            let node_subnets = match cidr.node_subnet_count(mask) {
                Some(u128::MAX) => "max".to_string(),
                Some(count) => count.to_string(),
                None => "-".to_string(),
            };
            rows.push(PlanRow {
                role: "cluster",
                cidr: cidr.to_string(),
                family: cidr.family().to_string(),
                node_mask: format!("/{mask}"),
                node_subnets,
            });
        }
    }

    let ranges = &plan.service_ranges;
    for range in std::iter::once(ranges.primary).chain(ranges.secondary) {
        rows.push(PlanRow {
            role: "service",
            cidr: range.to_string(),
            family: range.family().to_string(),
            node_mask: "-".to_string(),
            node_subnets: "-".to_string(),
        });
    }
    rows.push(PlanRow {
        role: "apiserver",
        cidr: ranges.api_server_service_ip.to_string(),
        family: ranges.primary.family().to_string(),
        node_mask: "-".to_string(),
        node_subnets: "-".to_string(),
    });

    rows
}

/// Left-align a value in a field of at least `width` characters.
pub fn pad_field<T: ToString>(value: T, width: usize) -> String {
    format!("{:<width$}", value.to_string())
}

/// Print the plan summary to stdout.
pub fn print_plan(plan: &AddressPlan) {
    if plan.node_ipam.is_none() {
        log::info!("Node CIDR allocation disabled, only service ranges resolved");
    }

    println!(
        "{}",
        format!(
            "{} {} {} {} {}",
            pad_field("role", 10),
            pad_field("cidr", 28),
            pad_field("family", 7),
            pad_field("node_mask", 10),
            "node_subnets"
        )
        .bold()
    );
    for row in plan_rows(plan) {
        let role = match row.role {
            "cluster" => pad_field(row.role, 10).green(),
            "service" => pad_field(row.role, 10).blue(),
            _ => pad_field(row.role, 10).yellow(),
        };
        println!(
            "{role} {} {} {} {}",
            pad_field(&row.cidr, 28),
            pad_field(&row.family, 7),
            pad_field(&row.node_mask, 10),
            row.node_subnets
        );
    }
}
