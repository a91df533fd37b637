// src/services/document_service.rs

use genpdf::{elements, style, Element};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, MemberRepository},
    models::finance::{IncomeStatement, StatementPeriod},
    services::finance_service::FinanceService,
};

const ORG_NAME: &str = "JUNTA USUARIOS PISCINA ALBROOK";

#[derive(Clone)]
pub struct DocumentService {
    finance_repo: FinanceRepository,
    member_repo: MemberRepository,
    finance_service: FinanceService,
    pool: sqlx::PgPool,
}

fn currency(amount: rust_decimal::Decimal) -> String {
    format!("${:.2}", amount)
}

fn new_document(title: &str) -> Result<genpdf::Document, AppError> {
    // Carrega a fonte da pasta 'fonts/'
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
        .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(title);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn render(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(buffer)
}

impl DocumentService {
    pub fn new(
        finance_repo: FinanceRepository,
        member_repo: MemberRepository,
        finance_service: FinanceService,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            finance_repo,
            member_repo,
            finance_service,
            pool,
        }
    }

    // Recibo oficial de um pagamento já lançado
    pub async fn payment_receipt(&self, transaction_id: Uuid) -> Result<Vec<u8>, AppError> {
        let transaction = self
            .finance_repo
            .get_transaction(&self.pool, transaction_id)
            .await?;

        let payer = match transaction.related_member_id {
            Some(member_id) => match self.member_repo.get(&self.pool, member_id).await {
                Ok(member) => member.full_name,
                // Sócio excluído depois do pagamento: o recibo ainda sai
                Err(AppError::NotFound) => "Socio / Cliente".to_string(),
                Err(e) => return Err(e),
            },
            None => "Socio / Cliente".to_string(),
        };

        let bank_name = match transaction.related_bank_account_id {
            Some(account_id) => match self.finance_repo.get_account(&self.pool, account_id).await {
                Ok(account) => account.bank_name,
                Err(AppError::NotFound) => "Caja / Banco".to_string(),
                Err(e) => return Err(e),
            },
            None => "Caja / Banco".to_string(),
        };

        let receipt_number = {
            let id = transaction.id.to_string();
            id[id.len() - 6..].to_uppercase()
        };

        let mut doc = new_document(&format!("Recibo #{}", receipt_number))?;

        doc.push(
            elements::Paragraph::new(ORG_NAME)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new("Recibo de Pago Oficial")
                .styled(style::Style::new().with_font_size(12)),
        );
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(format!("Fecha: {}", transaction.date)));
        doc.push(elements::Paragraph::new(format!("Recibo No: #{}", receipt_number)));
        doc.push(elements::Break::new(2));

        let mut table = elements::TableLayout::new(vec![2, 5]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Recibimos de:").styled(style_bold))
            .element(elements::Paragraph::new(payer))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        table
            .row()
            .element(elements::Paragraph::new("La suma de:").styled(style_bold))
            .element(
                elements::Paragraph::new(currency(transaction.amount))
                    .styled(style::Style::new().bold().with_font_size(14)),
            )
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        table
            .row()
            .element(elements::Paragraph::new("Por concepto de:").styled(style_bold))
            .element(elements::Paragraph::new(format!(
                "{:?} - {}",
                transaction.category, transaction.description
            )))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        table
            .row()
            .element(elements::Paragraph::new("Método de Pago:").styled(style_bold))
            .element(elements::Paragraph::new(bank_name))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        doc.push(table);

        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new(
            "Este documento sirve como comprobante oficial del pago realizado a la Junta.",
        ));
        doc.push(elements::Break::new(3));
        doc.push(elements::Paragraph::new("_________________________"));
        doc.push(elements::Paragraph::new("Entregado por"));
        doc.push(elements::Paragraph::new(ORG_NAME).styled(style::Style::new().with_font_size(8)));

        render(doc)
    }

    // Estado de resultados do período, pronto para a assembleia
    pub async fn income_statement_pdf(&self, period: &StatementPeriod) -> Result<Vec<u8>, AppError> {
        let statement = self.finance_service.income_statement(period).await?;
        let period_label = match (period.from, period.to) {
            (Some(from), Some(to)) => format!("{} a {}", from, to),
            (Some(from), None) => format!("desde {}", from),
            (None, Some(to)) => format!("hasta {}", to),
            (None, None) => "Histórico completo".to_string(),
        };

        let mut doc = new_document("Estado de Resultados")?;

        doc.push(
            elements::Paragraph::new(ORG_NAME)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new("Estado de Resultados")
                .styled(style::Style::new().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Período: {}", period_label)));
        doc.push(elements::Break::new(2));

        Self::push_section(&mut doc, "INGRESOS", &statement, true)?;
        doc.push(elements::Break::new(1));
        Self::push_section(&mut doc, "GASTOS OPERATIVOS", &statement, false)?;

        if !statement.project_expenses.is_empty() {
            doc.push(elements::Break::new(1));
            doc.push(
                elements::Paragraph::new("Proyectos e Inversiones")
                    .styled(style::Style::new().bold()),
            );
            let mut table = elements::TableLayout::new(vec![5, 2]);
            table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
            for project in &statement.project_expenses {
                table
                    .row()
                    .element(elements::Paragraph::new(project.project_name.clone()))
                    .element(elements::Paragraph::new(currency(project.total)))
                    .push()
                    .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
            }
            doc.push(table);
        }

        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new(format!(
                "RESULTADO DEL EJERCICIO: {}",
                currency(statement.net_result)
            ))
            .styled(style::Style::new().bold().with_font_size(12)),
        );

        render(doc)
    }

    fn push_section(
        doc: &mut genpdf::Document,
        title: &str,
        statement: &IncomeStatement,
        is_income: bool,
    ) -> Result<(), AppError> {
        doc.push(
            elements::Paragraph::new(title).styled(style::Style::new().bold().with_font_size(12)),
        );

        let rows = if is_income {
            &statement.income_by_category
        } else {
            &statement.expense_by_category
        };
        let total = if is_income {
            statement.income
        } else {
            statement.expense
        };

        let mut table = elements::TableLayout::new(vec![5, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
        for row in rows {
            table
                .row()
                .element(elements::Paragraph::new(row.category.clone()))
                .element(elements::Paragraph::new(currency(row.total)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }
        table
            .row()
            .element(
                elements::Paragraph::new(if is_income {
                    "Total Ingresos"
                } else {
                    "Total Egresos"
                })
                .styled(style::Style::new().bold()),
            )
            .element(elements::Paragraph::new(currency(total)).styled(style::Style::new().bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        doc.push(table);
        Ok(())
    }
}
