use crate::motivation::MotivationalAlertInput;

/// Fill in the fixed prompt with the representative's name and numbers.
pub fn render_prompt(input: &MotivationalAlertInput) -> String {
    let name = &input.sales_representative_name;
    let current = input.current_commission;
    let target = input.target_commission;

    format!(
        "Você é um especialista em motivação de equipes de vendas.

Crie uma mensagem motivacional para o representante de vendas {name}.
A mensagem deve ser inspiradora e focada em incentivá-lo a atingir sua meta de comissão.

Informações do representante:
- Nome: {name}
- Comissão atual: {current}
- Meta de comissão: {target}

A mensagem deve ser concisa e relevante para a situação atual do representante.
Determine se a mensagem é relevante com base na proximidade da meta de comissão.
Se a comissão atual estiver próxima da meta, a mensagem deve ser mais urgente e encorajadora.
Se a comissão atual estiver distante da meta, a mensagem deve ser mais motivacional e inspiradora.
Se a comissão atual já tiver atingido a meta, a mensagem deve ser de parabéns e reconhecimento.
Considere que a mensagem deve ser em português.
"
    )
}
