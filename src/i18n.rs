//! The two bundled locales: Greek (default) and English.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    El,
    En,
}

impl Locale {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::El => &EL,
            Locale::En => &EN,
        }
    }
}

/// Receipt texts that differ between payment and collection receipts.
#[derive(Debug)]
pub struct ReceiptTexts {
    pub title: &'static str,
    pub customer_heading: &'static str,
    pub description_heading: &'static str,
    pub amount_label: &'static str,
    pub footer: &'static str,
}

#[derive(Debug)]
pub struct Labels {
    pub deleted_service: &'static str,
    /// Import template headers, in column order.
    pub template_headers: [&'static str; 6],
    pub template_sheet: &'static str,

    pub company_placeholder: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub tax_id: &'static str,
    pub receipt_number: &'static str,
    pub date: &'static str,
    pub name: &'static str,
    pub notes: &'static str,
    pub company_signature: &'static str,
    pub customer_signature: &'static str,
    pub payment: ReceiptTexts,
    pub collection: ReceiptTexts,
}

static EL: Labels = Labels {
    deleted_service: "Διαγραμμένη Υπηρεσία",
    template_headers: [
        "Ονοματεπώνυμο Πελάτη",
        "Υπηρεσία",
        "Ημερομηνία (YYYY-MM-DD)",
        "Τελικό Κόστος (με ΦΠΑ)",
        "Κατάσταση",
        "Σχόλια",
    ],
    template_sheet: "Data",
    company_placeholder: "Επωνυμία Εταιρείας",
    address: "Διεύθυνση",
    phone: "Τηλ",
    email: "Email",
    tax_id: "ΑΦΜ",
    receipt_number: "Αριθμός Απόδειξης",
    date: "Ημερομηνία",
    name: "Όνομα",
    notes: "Παρατηρήσεις",
    company_signature: "Υπογραφή / Σφραγίδα Μηχανικού",
    customer_signature: "Υπογραφή / Σφραγίδα Πελάτη",
    payment: ReceiptTexts {
        title: "ΑΠΟΔΕΙΞΗ ΠΛΗΡΩΜΗΣ",
        customer_heading: "Στοιχεία Πελάτη:",
        description_heading: "Περιγραφή Υπηρεσίας:",
        amount_label: "Ποσό Πληρωμής:",
        footer: "Ευχαριστούμε για την προτίμησή σας!",
    },
    collection: ReceiptTexts {
        title: "ΑΠΟΔΕΙΞΗ ΕΙΣΠΡΑΞΗΣ",
        customer_heading: "Είσπραξη από:",
        description_heading: "Περιγραφή:",
        amount_label: "Ποσό Είσπραξης:",
        footer: "Ευχαριστούμε για την συνεργασία!",
    },
};

static EN: Labels = Labels {
    deleted_service: "Deleted service",
    template_headers: [
        "Customer Name",
        "Service",
        "Date (YYYY-MM-DD)",
        "Final Cost (incl. VAT)",
        "Status",
        "Notes",
    ],
    template_sheet: "Data",
    company_placeholder: "Company Name",
    address: "Address",
    phone: "Phone",
    email: "Email",
    tax_id: "Tax ID",
    receipt_number: "Receipt No.",
    date: "Date",
    name: "Name",
    notes: "Notes",
    company_signature: "Signature / Stamp (Company)",
    customer_signature: "Signature / Stamp (Customer)",
    payment: ReceiptTexts {
        title: "PAYMENT RECEIPT",
        customer_heading: "Customer:",
        description_heading: "Service Description:",
        amount_label: "Amount Paid:",
        footer: "Thank you for your preference!",
    },
    collection: ReceiptTexts {
        title: "COLLECTION RECEIPT",
        customer_heading: "Received from:",
        description_heading: "Description:",
        amount_label: "Amount Collected:",
        footer: "Thank you for your cooperation!",
    },
};
