// ABOUTME: Static membership plan catalog
// ABOUTME: Pricing and feature lists served to the upgrade page

use serde::Serialize;

/// A subscription plan as presented on the upgrade page
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: u32,
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub popular: bool,
}

/// The three plans on offer. Purely informational: plan changes go through
/// an upgrade request reviewed by an administrator, not self-service billing.
pub fn plan_catalog() -> Vec<Plan> {
    vec![
        Plan {
            id: 1,
            name: "Basic",
            price: "$299",
            period: "/month",
            description: "Perfect for small businesses getting started",
            features: vec![
                "Basic Website Management",
                "Monthly SEO Reports",
                "Social Media Setup",
                "2 Content Updates/Month",
                "Email Support",
                "1 GB File Storage",
            ],
            popular: false,
        },
        Plan {
            id: 2,
            name: "Pro",
            price: "$599",
            period: "/month",
            description: "Ideal for growing businesses",
            features: vec![
                "Advanced Website Management",
                "Weekly SEO Optimization",
                "Social Media Management (3 platforms)",
                "8 Content Updates/Month",
                "Priority Email & Chat Support",
                "10 GB File Storage",
                "Monthly Performance Reports",
                "Keyword Research",
            ],
            popular: true,
        },
        Plan {
            id: 3,
            name: "Premium",
            price: "$999",
            period: "/month",
            description: "For businesses that demand the best",
            features: vec![
                "Full Website Management & Development",
                "Daily SEO Monitoring & Optimization",
                "Social Media Management (All platforms)",
                "Unlimited Content Updates",
                "24/7 Priority Support",
                "Unlimited File Storage",
                "Weekly Performance Reports",
                "Advanced Analytics Dashboard",
                "Dedicated Account Manager",
                "Custom Integrations",
            ],
            popular: false,
        },
    ]
}
