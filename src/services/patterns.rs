// src/services/patterns.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryId {
    Greetings,
    Orders,
    Products,
    Returns,
    Payment,
    Account,
    Deals,
    Contact,
    ShippingCost,
    Thanks,
    TrackOrder,
    ShippingInfo,
    PaymentMethods,
    ReturnPolicy,
}

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Greetings => "greetings",
            CategoryId::Orders => "orders",
            CategoryId::Products => "products",
            CategoryId::Returns => "returns",
            CategoryId::Payment => "payment",
            CategoryId::Account => "account",
            CategoryId::Deals => "deals",
            CategoryId::Contact => "contact",
            CategoryId::ShippingCost => "shippingCost",
            CategoryId::Thanks => "thanks",
            CategoryId::TrackOrder => "trackOrder",
            CategoryId::ShippingInfo => "shippingInfo",
            CategoryId::PaymentMethods => "paymentMethods",
            CategoryId::ReturnPolicy => "returnPolicy",
        }
    }
}

/// A topic grouping: lowercase trigger phrases and the replies it may answer with.
#[derive(Debug)]
pub struct Category {
    pub id: CategoryId,
    pub triggers: &'static [&'static str],
    pub replies: &'static [&'static str],
}

impl Category {
    pub fn is_quick_option(&self) -> bool {
        matches!(
            self.id,
            CategoryId::TrackOrder
                | CategoryId::ShippingInfo
                | CategoryId::PaymentMethods
                | CategoryId::ReturnPolicy
        )
    }
}

pub const TRACK_ORDER_REPLY: &str = "You can track your order in your profile under \"My Orders\". \
Each order shows its current status and, once it has shipped, a tracking number for the carrier.";

pub const SHIPPING_INFO_REPLY: &str = "We ship to all 50 states. Standard shipping takes 3-5 business days \
and express shipping takes 1-2 business days. Shipping is free on orders over $50.";

pub const PAYMENT_METHODS_REPLY: &str = "We accept Visa, Mastercard, American Express, PayPal and Apple Pay. \
All payments are processed securely at checkout.";

pub const RETURN_POLICY_REPLY: &str = "You can return most items within 30 days of delivery for a full refund. \
Items must be unused and in their original packaging. Start a return from the order page in your profile.";

static GENERAL: [Category; 10] = [
    Category {
        id: CategoryId::Greetings,
        triggers: &["hello", "hi", "hey", "good morning", "good afternoon", "good evening", "greetings"],
        replies: &[
            "Hello! How can I help you today?",
            "Hi there! What can I assist you with?",
            "Welcome! How may I help you?",
            "Greetings! How can I make your shopping experience better today?",
        ],
    },
    Category {
        id: CategoryId::Orders,
        triggers: &["order", "track", "package", "delivery", "shipped", "where is my"],
        replies: &[
            "You can track your order in your profile under \"My Orders\".",
            "To check on an order, open your profile and select the order you want to follow.",
            "Orders usually ship within 1-2 business days. Tracking details are in your order history.",
            "Your order status and tracking number are available under \"My Orders\" in your profile.",
        ],
    },
    Category {
        id: CategoryId::Products,
        triggers: &["product", "item", "stock", "available", "size", "color", "catalog"],
        replies: &[
            "You can browse all of our products from the shop page and filter by category.",
            "Each product page shows availability, sizes and colors. Is there something specific you are looking for?",
            "If an item is out of stock, add it to your wishlist and check back soon.",
            "Use the search bar at the top of the page to find a product quickly.",
        ],
    },
    Category {
        id: CategoryId::Returns,
        triggers: &["return", "refund", "exchange", "send back", "damaged"],
        replies: &[
            "Most items can be returned within 30 days of delivery for a full refund.",
            "To start a return, open the order in your profile and choose \"Return item\".",
            "Refunds go back to your original payment method within 5-7 business days after we receive the item.",
            "If your item arrived damaged, please contact support and we will send a replacement.",
        ],
    },
    Category {
        id: CategoryId::Payment,
        triggers: &["payment", "pay", "credit card", "paypal", "checkout", "charged"],
        replies: &[
            "We accept all major credit cards, PayPal and Apple Pay.",
            "Payments are processed securely at checkout. We never store your full card number.",
            "If you were charged incorrectly, please contact support with your order number.",
            "You can choose your payment method on the checkout page before placing the order.",
        ],
    },
    Category {
        id: CategoryId::Account,
        triggers: &["account", "password", "login", "sign in", "profile", "register", "sign up"],
        replies: &[
            "You can manage your account details from the profile settings page.",
            "Forgot your password? Use the \"Forgot password\" link on the login page to reset it.",
            "Creating an account lets you track orders, save a wishlist and check out faster.",
            "To update your email or address, open your profile and edit your settings.",
        ],
    },
    Category {
        id: CategoryId::Deals,
        triggers: &["discount", "deal", "sale", "coupon", "promo", "offer"],
        replies: &[
            "Check our deals section for the latest discounts.",
            "Promo codes can be applied in the cart before checkout.",
            "Sign up for our newsletter to get exclusive offers.",
            "We run seasonal sales throughout the year. Keep an eye on the home page!",
        ],
    },
    Category {
        id: CategoryId::Contact,
        triggers: &["contact", "support", "help", "phone", "email", "human", "agent"],
        replies: &[
            "You can reach our support team at support@shop.example or call 1-800-555-0199.",
            "Our support team is available Monday to Friday, 9am to 6pm.",
            "Send us a message from the contact page and we will get back to you within 24 hours.",
            "I'm here to help! You can also email support@shop.example for anything I can't answer.",
        ],
    },
    Category {
        id: CategoryId::ShippingCost,
        triggers: &["shipping cost", "shipping fee", "free shipping", "how much is shipping", "delivery cost"],
        replies: &[
            "Shipping is free on orders over $50. Otherwise standard shipping costs $4.99.",
            "Standard shipping is $4.99 and express shipping is $12.99. Orders over $50 ship free.",
            "Free shipping applies automatically to orders over $50.",
            "Shipping costs are calculated at checkout based on the method you choose.",
        ],
    },
    Category {
        id: CategoryId::Thanks,
        triggers: &["thank", "thanks", "appreciate", "great", "awesome"],
        replies: &[
            "You're welcome! Is there anything else I can help you with?",
            "Happy to help! Let me know if you need anything else.",
            "My pleasure! Enjoy your shopping.",
            "Glad I could help! Have a great day.",
        ],
    },
];

static QUICK_OPTIONS: [Category; 4] = [
    Category {
        id: CategoryId::TrackOrder,
        triggers: &["track my order"],
        replies: &[TRACK_ORDER_REPLY],
    },
    Category {
        id: CategoryId::ShippingInfo,
        triggers: &["shipping information"],
        replies: &[SHIPPING_INFO_REPLY],
    },
    Category {
        id: CategoryId::PaymentMethods,
        triggers: &["payment methods"],
        replies: &[PAYMENT_METHODS_REPLY],
    },
    Category {
        id: CategoryId::ReturnPolicy,
        triggers: &["return policy"],
        replies: &[RETURN_POLICY_REPLY],
    },
];

pub const DEFAULT_REPLIES: [&str; 4] = [
    "I'm not sure I understand. Could you rephrase that?",
    "I'm sorry, I didn't catch that. Can you tell me more about what you need?",
    "I don't have an answer for that yet. You can reach our support team from the contact page.",
    "Could you give me a bit more detail? I can help with orders, products, returns, payments and your account.",
];

/// General categories in declaration order; this order is the match priority.
pub fn general_categories() -> &'static [Category] {
    &GENERAL
}

/// The four menu shortcuts, matched only on exact text.
pub fn quick_option_categories() -> &'static [Category] {
    &QUICK_OPTIONS
}

/// Every category, general first.
pub fn lookup_categories() -> Vec<&'static Category> {
    GENERAL.iter().chain(QUICK_OPTIONS.iter()).collect()
}

pub fn find_category(id: CategoryId) -> Option<&'static Category> {
    GENERAL.iter().chain(QUICK_OPTIONS.iter()).find(|c| c.id == id)
}
