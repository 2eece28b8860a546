use chrono::{Duration, Utc};

use crate::models::booking::{BookingRequest, PaymentMode, Priority};

/// Pickup requests a fresh session starts with.
pub fn seed_bookings() -> Vec<BookingRequest> {
    let now = Utc::now();

    vec![
        BookingRequest {
            id: "1".to_string(),
            scrap_type: "Paper".to_string(),
            distance: "2.5 km".to_string(),
            customer_name: "Rajesh Kumar".to_string(),
            customer_phone: "+91 98765 43210".to_string(),
            address: "123, MG Road, Sector 14, Gurugram".to_string(),
            payment_mode: PaymentMode::Cash,
            estimated_amount: 250.0,
            created_at: now - Duration::minutes(5),
            priority: Some(Priority::High),
            estimated_time: Some("15 mins".to_string()),
        },
        BookingRequest {
            id: "2".to_string(),
            scrap_type: "Plastic".to_string(),
            distance: "4.1 km".to_string(),
            customer_name: "Priya Sharma".to_string(),
            customer_phone: "+91 87654 32109".to_string(),
            address: "45, DLF Phase 2, Gurugram".to_string(),
            payment_mode: PaymentMode::Upi,
            estimated_amount: 180.0,
            created_at: now - Duration::minutes(12),
            priority: Some(Priority::Medium),
            estimated_time: Some("25 mins".to_string()),
        },
        BookingRequest {
            id: "3".to_string(),
            scrap_type: "Iron".to_string(),
            distance: "1.2 km".to_string(),
            customer_name: "Amit Verma".to_string(),
            customer_phone: "+91 76543 21098".to_string(),
            address: "78, Sushant Lok 1, Gurugram".to_string(),
            payment_mode: PaymentMode::Digital,
            estimated_amount: 420.0,
            created_at: now - Duration::minutes(20),
            priority: Some(Priority::Low),
            estimated_time: Some("10 mins".to_string()),
        },
        BookingRequest {
            id: "4".to_string(),
            scrap_type: "E-Waste".to_string(),
            distance: "6.8 km".to_string(),
            customer_name: "Sneha Patel".to_string(),
            customer_phone: "+91 65432 10987".to_string(),
            address: "12, Golf Course Road, Gurugram".to_string(),
            payment_mode: PaymentMode::Upi,
            estimated_amount: 600.0,
            created_at: now - Duration::minutes(32),
            priority: Some(Priority::High),
            estimated_time: Some("35 mins".to_string()),
        },
        BookingRequest {
            id: "5".to_string(),
            scrap_type: "Mixed household".to_string(),
            distance: "3.0 km".to_string(),
            customer_name: "Vikram Singh".to_string(),
            customer_phone: "+91 54321 09876".to_string(),
            address: "9, South City 2, Gurugram".to_string(),
            payment_mode: PaymentMode::Cash,
            estimated_amount: 150.0,
            created_at: now - Duration::minutes(45),
            priority: None,
            estimated_time: None,
        },
    ]
}
